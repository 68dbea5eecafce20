use druid::{
    widget::{Button, CrossAxisAlignment, Flex, Label, LineBreaking, MainAxisAlignment},
    Widget, WidgetExt,
};

use explorer_core::view::Action;

use crate::{cmd, data::AppState, ui::theme};

pub fn welcome_widget(heading: String, explore: Action) -> impl Widget<AppState> {
    let heading = Label::new(heading)
        .with_font(theme::UI_FONT_HEADING)
        .with_line_break_mode(LineBreaking::WordWrap);

    let label = explore.label.clone();
    let button = Button::new(label)
        .on_click(move |ctx, _, _| ctx.submit_command(cmd::from_intent(&explore.intent)));

    Flex::column()
        .main_axis_alignment(MainAxisAlignment::Center)
        .cross_axis_alignment(CrossAxisAlignment::Center)
        .with_child(heading)
        .with_spacer(theme::grid(2.0))
        .with_child(button)
        .padding(theme::grid(2.0))
        .expand()
}
