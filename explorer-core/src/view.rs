//! What each screen shows, independent of any widget toolkit.

use crate::{
    catalog::{self, City},
    loader::ImageRequest,
    nav::{InstanceId, Intent},
    photo::ImageSource,
    screen::ScreenId,
};

pub const WELCOME_HEADING: &str = "Welcome to the City Explorer App!";
pub const EXPLORE_LABEL: &str = "Explore Cities";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub label: String,
    pub intent: Intent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    Welcome {
        heading: String,
        explore: Action,
    },
    List {
        back: Intent,
        rows: Vec<Action>,
    },
    Detail {
        back: Intent,
        greeting: String,
        description: String,
        image: ImageRequest,
    },
}

/// Side effect a freshly mounted screen asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    FetchImage(ImageRequest),
}

/// Describes `instance` of `screen`. The detail picture is requested on
/// behalf of that instance, so it can be dropped once the screen goes away.
pub fn render(screen: &ScreenId, instance: InstanceId, images: &ImageSource) -> View {
    match screen {
        ScreenId::Welcome => View::Welcome {
            heading: WELCOME_HEADING.to_string(),
            explore: Action {
                label: EXPLORE_LABEL.to_string(),
                intent: Intent::Navigate(ScreenId::List),
            },
        },
        ScreenId::List => View::List {
            back: Intent::NavigateUp,
            rows: catalog::cities()
                .map(|city| Action {
                    label: city.to_string(),
                    intent: Intent::Navigate(ScreenId::Detail(city)),
                })
                .collect(),
        },
        ScreenId::Detail(city) => View::Detail {
            back: Intent::NavigateUp,
            greeting: greeting(city),
            description: description(city),
            image: ImageRequest {
                city: city.clone(),
                instance,
                url: images.url_for(city),
            },
        },
    }
}

pub fn commands(screen: &ScreenId, instance: InstanceId, images: &ImageSource) -> Vec<Command> {
    match render(screen, instance, images) {
        View::Detail { image, .. } => vec![Command::FetchImage(image)],
        View::Welcome { .. } | View::List { .. } => Vec::new(),
    }
}

pub fn greeting(city: &City) -> String {
    format!("Welcome to {city}!")
}

pub fn description(city: &City) -> String {
    format!("Description {city} goes here.")
}
