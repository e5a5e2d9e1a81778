//! View-model tests using EffectStore and EffectStoreTestHarness

use pokedex::action::Action;
use pokedex::effect::Effect;
use pokedex::model::{PokemonDetail, PokemonSummary, PokemonType, RegionId};
use pokedex::reducer::reducer;
use pokedex::state::{AppState, ListSource};
use tui_dispatch::testing::*;
use tui_dispatch::EffectStore;

fn pokemon_type(name: &str) -> PokemonType {
    PokemonType {
        name: name.to_string(),
        reference_url: format!("https://pokeapi.co/api/v2/type/{name}/"),
    }
}

fn summary(name: &str) -> PokemonSummary {
    PokemonSummary {
        name: name.to_string(),
        reference_url: format!("https://pokeapi.co/api/v2/pokemon-species/{name}/"),
    }
}

fn pikachu() -> PokemonDetail {
    PokemonDetail {
        id: Some(25),
        name: "pikachu".to_string(),
        height_decimeters: 4,
        weight_hectograms: 60,
        types: vec!["electric".to_string()],
        abilities: vec!["static".to_string(), "lightning-rod".to_string()],
        moves: vec!["mega-punch".to_string()],
        sprite_url: None,
        description: None,
        category: None,
    }
}

#[test]
fn init_requests_every_list() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::Init);

    assert!(result.changed);
    assert_eq!(
        result.effects,
        vec![Effect::LoadRegions, Effect::LoadTypes, Effect::LoadFavorites]
    );
    assert!(store.state().region_loading);
    assert!(store.state().type_loading);
}

#[test]
fn type_failure_keeps_prior_list() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    let types: Vec<PokemonType> = ["normal", "fire", "water"]
        .into_iter()
        .map(pokemon_type)
        .collect();

    store.dispatch(Action::Init);
    store.dispatch(Action::TypesDidLoad(types.clone()));
    store.dispatch(Action::TypesDidError("connection refused".into()));

    assert_eq!(store.state().types, types);
    assert!(!store.state().type_loading);
    assert!(store
        .state()
        .message
        .as_deref()
        .is_some_and(|msg| msg.contains("connection refused")));
}

#[test]
fn type_failure_on_empty_list_stays_empty() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.complete_action(Action::TypesDidError("timed out".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.types.is_empty());
    harness.assert_state(|s| s.message.is_some());
}

#[test]
fn list_open_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let source = ListSource::Region(RegionId::Kanto);

    harness.dispatch_collect(Action::ListOpen(source.clone()));
    harness.assert_state(|s| s.list_loading);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::LoadList { source: ListSource::Region(RegionId::Kanto) })
    });

    harness.complete_action(Action::ListDidLoad {
        source,
        pokemon: vec![summary("bulbasaur"), summary("ivysaur")],
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1);
    assert_eq!(changed, 1);
    harness.assert_state(|s| !s.list_loading && s.pokemon.len() == 2);
}

#[test]
fn stale_list_result_is_discarded() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::ListOpen(ListSource::Region(RegionId::Kanto)));
    store.dispatch(Action::ListOpen(ListSource::Type("fire".into())));
    let result = store.dispatch(Action::ListDidLoad {
        source: ListSource::Region(RegionId::Kanto),
        pokemon: vec![summary("bulbasaur")],
    });

    assert!(!result.changed);
    assert!(store.state().pokemon.is_empty());
    assert!(store.state().list_loading);
}

#[test]
fn detail_open_resolves_and_checks_favorite() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::DetailOpen("Pikachu".into()));

    assert_eq!(
        result.effects,
        vec![
            Effect::ResolveDetail {
                name: "pikachu".into()
            },
            Effect::CheckFavorite {
                name: "pikachu".into()
            },
        ]
    );
    assert!(store.state().is_loading());
}

#[test]
fn detail_error_is_unavailable_state() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::DetailOpen("missingno".into()));
    store.dispatch(Action::DetailDidError {
        name: "missingno".into(),
        error: "details unavailable for missingno".into(),
    });

    let screen = store.state().detail.as_ref().unwrap();
    assert!(screen.is_unavailable());
    assert_eq!(
        screen.detail.error(),
        Some("details unavailable for missingno")
    );
}

#[test]
fn closed_detail_ignores_late_result() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::DetailOpen("pikachu".into()));
    store.dispatch(Action::DetailClose);
    let result = store.dispatch(Action::DetailDidLoad {
        name: "pikachu".into(),
        detail: pikachu(),
    });

    assert!(!result.changed);
    assert!(store.state().detail.is_none());
}

#[test]
fn detail_close_cancels_lookups() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert!(store.dispatch(Action::DetailClose).effects.is_empty());
    store.dispatch(Action::DetailOpen("pikachu".into()));
    let result = store.dispatch(Action::DetailClose);

    assert!(result.changed);
    assert_eq!(result.effects, vec![Effect::CancelDetail]);
}

#[test]
fn detail_opened_by_id_rechecks_under_real_name() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::DetailOpen("25".into()));
    let result = store.dispatch(Action::DetailDidLoad {
        name: "25".into(),
        detail: pikachu(),
    });

    assert_eq!(
        result.effects,
        vec![Effect::CheckFavorite {
            name: "pikachu".into()
        }]
    );
    assert!(store.state().is_detail_for("pikachu"));
    assert_eq!(store.state().current_detail(), Some(&pikachu()));
}

#[test]
fn favorite_toggle_flips_immediately() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::DetailOpen("pikachu".into()));
    harness.complete_action(Action::DetailDidLoad {
        name: "pikachu".into(),
        detail: pikachu(),
    });
    harness.process_emitted();
    harness.drain_effects();

    harness.dispatch_collect(Action::FavoriteToggle);
    harness.assert_state(|s| s.detail.as_ref().is_some_and(|screen| screen.is_favorite));

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::ToggleFavorite { detail } if detail.name == "pikachu"),
    );
}

#[test]
fn status_read_after_toggle_keeps_the_flipped_flag() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::DetailOpen("pikachu".into()));
    store.dispatch(Action::DetailDidLoad {
        name: "pikachu".into(),
        detail: pikachu(),
    });
    store.dispatch(Action::FavoriteToggle);
    let result = store.dispatch(Action::FavoriteStatusDidLoad {
        name: "pikachu".into(),
        is_favorite: false,
    });

    assert!(!result.changed);
    let screen = store.state().detail.as_ref().unwrap();
    assert!(screen.is_favorite);
    assert!(screen.toggle_pending);

    store.dispatch(Action::FavoriteDidPersist {
        name: "pikachu".into(),
        is_favorite: true,
    });
    let screen = store.state().detail.as_ref().unwrap();
    assert!(screen.is_favorite);
    assert!(!screen.toggle_pending);

    let result = store.dispatch(Action::FavoriteStatusDidLoad {
        name: "pikachu".into(),
        is_favorite: false,
    });
    assert!(result.changed);
    assert!(!store.state().detail.as_ref().unwrap().is_favorite);
}

#[test]
fn favorite_toggle_needs_loaded_detail() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::DetailOpen("pikachu".into()));
    let result = store.dispatch(Action::FavoriteToggle);

    assert!(!result.changed);
    assert!(result.effects.is_empty());
}

#[test]
fn favorite_persist_failure_only_notifies() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::DetailOpen("pikachu".into()));
    store.dispatch(Action::DetailDidLoad {
        name: "pikachu".into(),
        detail: pikachu(),
    });
    store.dispatch(Action::FavoriteToggle);
    let result = store.dispatch(Action::FavoriteDidError {
        name: "pikachu".into(),
        error: "disk full".into(),
    });

    assert!(result.effects.is_empty());
    let screen = store.state().detail.as_ref().unwrap();
    assert!(screen.is_favorite);
    assert!(!screen.toggle_pending);
    assert!(store.state().message.is_some());
}

#[test]
fn favorite_persist_refreshes_favorites() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::DetailOpen("pikachu".into()));
    let result = store.dispatch(Action::FavoriteDidPersist {
        name: "pikachu".into(),
        is_favorite: true,
    });

    assert_eq!(result.effects, vec![Effect::LoadFavorites]);
    assert!(store.state().detail.as_ref().unwrap().is_favorite);
}

#[test]
fn message_dismiss() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert!(!store.dispatch(Action::MessageDismiss).changed);
    store.dispatch(Action::RegionsDidError("offline".into()));
    assert!(store.dispatch(Action::MessageDismiss).changed);
    assert!(store.state().message.is_none());
}
