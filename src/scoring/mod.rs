pub mod engine;
pub mod minutes;
pub mod tables;

pub use engine::{
    basic_score, calculate_score, division_and_role_boost_score, division_boost_score,
    division_tournament_and_role_boost_score, score_report, PersonScore, ScoreMode, ScoreResult,
};
pub use minutes::estimate_minutes;
pub use tables::{base_score, is_referee, minutes_per_game, BASE_SCORES, GAME_MINUTES};
