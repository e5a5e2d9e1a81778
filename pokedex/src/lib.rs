//! PokeAPI browser core.
//!
//! Live lookups go through [`api::PokeApi`]; favorited Pokemon are kept in a
//! local [`favorites::FavoritesStore`] and served by
//! [`resolver::DetailResolver`] whenever the live lookup fails. The
//! action/reducer/effect modules are the view-model a screen renders from;
//! [`runner::EffectRunner`] drives it headlessly.

pub mod action;
pub mod api;
pub mod config;
pub mod effect;
pub mod error;
pub mod favorites;
pub mod logging;
pub mod model;
pub mod reducer;
pub mod resolver;
pub mod runner;
pub mod state;
