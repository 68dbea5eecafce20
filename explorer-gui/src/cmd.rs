use druid::{Command, Selector};

use explorer_core::{
    nav::{InstanceId, Intent},
    screen::ScreenId,
};

// Navigation

pub const NAVIGATE: Selector<ScreenId> = Selector::new("app.navigate");
pub const NAVIGATE_BACK: Selector = Selector::new("app.navigate-back");

/// Sent after a screen got replaced, its pending work can be dropped.
pub const SCREEN_UNMOUNTED: Selector<InstanceId> = Selector::new("app.screen-unmounted");

pub fn from_intent(intent: &Intent) -> Command {
    match intent {
        Intent::Navigate(screen) => NAVIGATE.with(screen.clone()),
        Intent::NavigateUp => NAVIGATE_BACK.into(),
    }
}
