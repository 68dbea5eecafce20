use std::{error, fmt, io};

#[derive(Debug)]
pub enum Error {
    InvalidUrl(String),
    ImageFetchError(Box<dyn error::Error + Send + Sync>),
    ImageDecodeError(Box<dyn error::Error + Send + Sync>),
    IoError(io::Error),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl(url) => write!(f, "Invalid URL: {url}"),
            Self::ImageFetchError(err) | Self::ImageDecodeError(err) => err.fmt(f),
            Self::IoError(err) => err.fmt(f),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IoError(err)
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Error {
        Error::ImageFetchError(Box::new(err))
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Error {
        Error::ImageDecodeError(Box::new(err))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::InvalidUrl(err.to_string())
    }
}
