pub mod remote_image;

pub use remote_image::RemoteImage;
