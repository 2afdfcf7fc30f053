mod favorite;
mod movie;
mod review;
mod video;

pub use favorite::FavoriteRepository;
pub use movie::MovieRepository;
pub use review::ReviewRepository;
pub use video::VideoRepository;
