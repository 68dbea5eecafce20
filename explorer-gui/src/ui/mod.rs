use druid::{
    widget::{CrossAxisAlignment, Flex, Label, ViewSwitcher},
    Env, Widget, WidgetExt, WindowDesc,
};

use explorer_core::{nav::Intent, view::View};

use crate::{
    cmd,
    controller::NavController,
    data::{AppState, Config},
};

pub mod city;
pub mod theme;
pub mod welcome;

pub fn main_window(config: &Config) -> WindowDesc<AppState> {
    WindowDesc::new(root_widget())
        .title(compute_main_window_title)
        .with_min_size((theme::grid(40.0), theme::grid(40.0)))
        .window_size((config.window_width, config.window_height))
}

fn compute_main_window_title(data: &AppState, _env: &Env) -> String {
    data.nav.current().title()
}

fn root_widget() -> impl Widget<AppState> {
    // Keyed by instance, so every navigation mounts a fresh screen.
    let screen = ViewSwitcher::new(
        |state: &AppState, _| state.nav.current_instance().get(),
        |_, state: &AppState, _| screen_widget(state),
    );

    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Fill)
        .with_flex_child(screen, 1.0)
        .background(theme::BACKGROUND_LIGHT)
        .controller(NavController)
}

fn screen_widget(state: &AppState) -> Box<dyn Widget<AppState>> {
    match state.view() {
        View::Welcome { heading, explore } => welcome::welcome_widget(heading, explore).boxed(),
        View::List { back, rows } => city::list_widget(back, rows).boxed(),
        View::Detail {
            back,
            greeting,
            description,
            image,
        } => city::detail_widget(back, greeting, description, image).boxed(),
    }
}

pub fn back_button(intent: Intent) -> impl Widget<AppState> {
    Label::new("‹ Back")
        .with_text_color(theme::BLUE_DARK)
        .padding((theme::grid(1.0), theme::grid(0.5)))
        .on_click(move |ctx, _, _| ctx.submit_command(cmd::from_intent(&intent)))
}
