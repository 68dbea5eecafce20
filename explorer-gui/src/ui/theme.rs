pub use druid::theme::*;
use druid::{Color, Env, FontDescriptor, FontFamily, FontWeight, Key};

use crate::data::AppState;

pub fn grid(m: f64) -> f64 {
    GRID * m
}

pub const GRID: f64 = 8.0;

pub const WHITE: Color = Color::WHITE;
pub const BLACK: Color = Color::BLACK;
pub const GREY_1: Color = Color::grey8(0x33);
pub const GREY_3: Color = Color::grey8(0x82);
pub const GREY_5: Color = Color::grey8(0xe0);
pub const GREY_6: Color = Color::grey8(0xf2);
pub const BLUE_LIGHT: Color = Color::rgb8(0x5c, 0xc4, 0xff);
pub const BLUE_DARK: Color = Color::rgb8(0x00, 0x8d, 0xdd);

pub const UI_FONT_MEDIUM: Key<FontDescriptor> = Key::new("app.ui-font-medium");
pub const UI_FONT_HEADING: Key<FontDescriptor> = Key::new("app.ui-font-heading");

pub const IMAGE_SIZE: f64 = 200.0;

pub fn setup(env: &mut Env, _state: &AppState) {
    env.set(WINDOW_BACKGROUND_COLOR, WHITE);
    env.set(LABEL_COLOR, GREY_1);
    env.set(PLACEHOLDER_COLOR, GREY_3);
    env.set(PRIMARY_LIGHT, BLUE_LIGHT);
    env.set(PRIMARY_DARK, BLUE_DARK);

    env.set(BACKGROUND_LIGHT, WHITE);
    env.set(BACKGROUND_DARK, GREY_6);
    env.set(FOREGROUND_LIGHT, GREY_1);
    env.set(FOREGROUND_DARK, BLACK);

    env.set(BUTTON_DARK, GREY_5);
    env.set(BUTTON_LIGHT, GREY_6);
    env.set(BUTTON_BORDER_RADIUS, 4.0);
    env.set(BUTTON_BORDER_WIDTH, 1.0);

    env.set(BORDER_DARK, GREY_5);
    env.set(BORDER_LIGHT, GREY_6);

    env.set(
        UI_FONT,
        FontDescriptor::new(FontFamily::SYSTEM_UI).with_size(14.0),
    );
    env.set(
        UI_FONT_MEDIUM,
        FontDescriptor::new(FontFamily::SYSTEM_UI)
            .with_size(16.0)
            .with_weight(FontWeight::MEDIUM),
    );
    env.set(
        UI_FONT_HEADING,
        FontDescriptor::new(FontFamily::SYSTEM_UI)
            .with_size(24.0)
            .with_weight(FontWeight::BOLD),
    );
    env.set(TEXT_SIZE_NORMAL, 14.0);
    env.set(TEXT_SIZE_LARGE, 18.0);
}
