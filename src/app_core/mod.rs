mod app;
pub use app::SongDeck;
