pub mod seaorm;

pub use seaorm::SeaOrmPostingRepository;
