use druid::{
    kurbo::Circle,
    widget::{
        CrossAxisAlignment, Flex, Label, LineBreaking, MainAxisAlignment, Painter, Scroll,
        SizedBox,
    },
    RenderContext, Widget, WidgetExt,
};

use explorer_core::{loader::ImageRequest, nav::Intent, view::Action};

use crate::{
    cmd,
    data::AppState,
    ui::{back_button, theme},
    widget::RemoteImage,
};

pub fn list_widget(back: Intent, rows: Vec<Action>) -> impl Widget<AppState> {
    let mut list = Flex::column().cross_axis_alignment(CrossAxisAlignment::Fill);
    for row in rows {
        list.add_child(row_widget(row));
    }

    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(back_button(back))
        .with_spacer(theme::grid(2.0))
        .with_flex_child(Scroll::new(list).vertical().expand_width(), 1.0)
        .padding(theme::grid(2.0))
}

fn row_widget(row: Action) -> impl Widget<AppState> {
    let divider = SizedBox::empty()
        .height(1.0)
        .expand_width()
        .background(theme::GREY_5);

    let label = row.label.clone();
    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(Label::new(label).with_font(theme::UI_FONT_MEDIUM))
        .with_spacer(theme::grid(1.0))
        .with_child(divider)
        .padding(theme::grid(2.0))
        .expand_width()
        .on_click(move |ctx, _, _| ctx.submit_command(cmd::from_intent(&row.intent)))
}

pub fn detail_widget(
    back: Intent,
    greeting: String,
    description: String,
    image: ImageRequest,
) -> impl Widget<AppState> {
    let greeting = Label::new(greeting)
        .with_font(theme::UI_FONT_HEADING)
        .with_line_break_mode(LineBreaking::WordWrap);
    let description = Label::new(description).with_line_break_mode(LineBreaking::WordWrap);
    let image = RemoteImage::new(image_placeholder(), move |_: &AppState, _| {
        Some(image.clone())
    })
    .fix_size(theme::IMAGE_SIZE, theme::IMAGE_SIZE);

    let content = Flex::column()
        .main_axis_alignment(MainAxisAlignment::Center)
        .cross_axis_alignment(CrossAxisAlignment::Center)
        .with_child(greeting)
        .with_spacer(theme::grid(2.0))
        .with_child(description)
        .with_spacer(theme::grid(2.0))
        .with_child(image);

    Flex::column()
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .with_child(back_button(back))
        .with_flex_child(content.expand(), 1.0)
        .padding(theme::grid(2.0))
}

fn image_placeholder() -> impl Widget<AppState> {
    Painter::new(|ctx, _: &AppState, _| {
        let size = ctx.size();
        let radius = size.width.min(size.height) / 2.0;
        let circle = Circle::new(size.to_rect().center(), radius);
        ctx.fill(circle, &theme::GREY_6);
    })
}
