pub mod movie;

pub use movie::{Movie, MovieDraft, MovieInput, MovieWithScreenings, Screening, ScreeningDraft};
