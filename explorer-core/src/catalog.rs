use std::{fmt, sync::Arc};

/// Cities shown on the list screen, in display order.
pub const CITIES: [&str; 3] = ["Yerevan", "Prague", "Barcelona"];

/// Name of a city. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct City(Arc<str>);

impl City {
    pub fn new(name: &str) -> Option<Self> {
        if name.is_empty() {
            None
        } else {
            Some(Self(name.into()))
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for City {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn cities() -> impl ExactSizeIterator<Item = City> {
    CITIES.iter().map(|&name| City(name.into()))
}
