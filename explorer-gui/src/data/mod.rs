mod config;

pub use crate::data::config::Config;

use druid::{Data, Lens};

use explorer_core::{
    nav::{Intent, Navigator, Transition},
    photo::ImageSource,
    screen::ScreenId,
    view::{self, View},
};

#[derive(Clone, Debug, Data, Lens)]
pub struct AppState {
    #[data(same_fn = "PartialEq::eq")]
    pub nav: Navigator,
    #[data(same_fn = "PartialEq::eq")]
    pub images: ImageSource,
    pub config: Config,
}

impl AppState {
    pub fn default_with_config(config: Config) -> Self {
        Self {
            nav: Navigator::new(),
            images: config.image_source(),
            config,
        }
    }

    pub fn navigate(&mut self, screen: &ScreenId) -> Transition {
        self.nav.dispatch(Intent::Navigate(screen.to_owned()))
    }

    pub fn navigate_back(&mut self) -> Transition {
        self.nav.dispatch(Intent::NavigateUp)
    }

    /// Content of the screen on top of the stack.
    pub fn view(&self) -> View {
        view::render(self.nav.current(), self.nav.current_instance(), &self.images)
    }
}
