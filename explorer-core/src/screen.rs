use std::fmt;

use crate::catalog::City;

pub const WELCOME_ROUTE: &str = "welcome screen";
pub const LIST_ROUTE: &str = "list screen";
pub const DETAIL_ROUTE: &str = "city detail screen";

const ROUTE_DELIMITER: char = '/';

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Welcome,
    List,
    Detail(City),
}

impl ScreenId {
    pub fn route(&self) -> String {
        match self {
            ScreenId::Welcome => WELCOME_ROUTE.to_string(),
            ScreenId::List => LIST_ROUTE.to_string(),
            ScreenId::Detail(city) => format!("{DETAIL_ROUTE}{ROUTE_DELIMITER}{city}"),
        }
    }

    /// Resolves a route string. Only the first delimiter is significant, the
    /// rest of a detail route is the city name, taken literally.
    pub fn from_route(route: &str) -> Option<Self> {
        match route {
            WELCOME_ROUTE => Some(ScreenId::Welcome),
            LIST_ROUTE => Some(ScreenId::List),
            _ => {
                let (prefix, city) = route.split_once(ROUTE_DELIMITER)?;
                if prefix == DETAIL_ROUTE {
                    City::new(city).map(ScreenId::Detail)
                } else {
                    None
                }
            }
        }
    }

    pub fn title(&self) -> String {
        match self {
            ScreenId::Welcome => "City Explorer".to_string(),
            ScreenId::List => "Cities".to_string(),
            ScreenId::Detail(city) => city.to_string(),
        }
    }
}

impl Default for ScreenId {
    fn default() -> Self {
        ScreenId::Welcome
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.route())
    }
}
