use druid::{
    piet::ImageFormat,
    widget::{prelude::*, Image},
    Data, ImageBuf, Point, Selector, WidgetPod,
};

use explorer_core::{loader::ImageRequest, photo::CityImage};

pub const REQUEST_DATA: Selector<ImageRequest> = Selector::new("remote-image.request-data");
pub const PROVIDE_DATA: Selector<ImagePayload> = Selector::new("remote-image.provide-data");

#[derive(Clone)]
pub struct ImagePayload {
    pub request: ImageRequest,
    pub image_buf: ImageBuf,
}

impl ImagePayload {
    pub fn new(request: ImageRequest, image: &CityImage) -> Self {
        let image_buf = ImageBuf::from_raw(
            image.pixels.clone(),
            ImageFormat::RgbaSeparate,
            image.width as usize,
            image.height as usize,
        );
        Self { request, image_buf }
    }
}

/// Shows `placeholder` until the image described by `locator` arrives.
///
/// A delivery is accepted only if its whole request matches, instance
/// included. Revisiting a city mounts a new instance with the same URL, and a
/// late result for the earlier visit must not land in it.
pub struct RemoteImage<T> {
    placeholder: WidgetPod<T, Box<dyn Widget<T>>>,
    image: Option<WidgetPod<T, Image>>,
    locator: Box<dyn Fn(&T, &Env) -> Option<ImageRequest>>,
    request: Option<ImageRequest>,
}

impl<T: Data> RemoteImage<T> {
    pub fn new(
        placeholder: impl Widget<T> + 'static,
        locator: impl Fn(&T, &Env) -> Option<ImageRequest> + 'static,
    ) -> Self {
        Self {
            placeholder: WidgetPod::new(placeholder).boxed(),
            locator: Box::new(locator),
            request: None,
            image: None,
        }
    }
}

impl<T: Data> Widget<T> for RemoteImage<T> {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut T, env: &Env) {
        if let Event::Command(cmd) = event {
            if let Some(payload) = cmd.get(PROVIDE_DATA) {
                if Some(&payload.request) == self.request.as_ref() {
                    self.image
                        .replace(WidgetPod::new(Image::new(payload.image_buf.clone())));
                    ctx.children_changed();
                }
                return;
            }
        }
        if let Some(image) = self.image.as_mut() {
            image.event(ctx, event, data, env);
        } else {
            self.placeholder.event(ctx, event, data, env);
        }
    }

    fn lifecycle(&mut self, ctx: &mut LifeCycleCtx, event: &LifeCycle, data: &T, env: &Env) {
        if let LifeCycle::WidgetAdded = event {
            let request = (self.locator)(data, env);
            self.image = None;
            self.request = request.clone();
            if let Some(request) = request {
                ctx.submit_command(REQUEST_DATA.with(request).to(ctx.widget_id()));
            }
        }
        if let Some(image) = self.image.as_mut() {
            image.lifecycle(ctx, event, data, env);
        } else {
            self.placeholder.lifecycle(ctx, event, data, env);
        }
    }

    fn update(&mut self, ctx: &mut UpdateCtx, _old_data: &T, data: &T, env: &Env) {
        let request = (self.locator)(data, env);
        if request != self.request {
            self.image = None;
            self.request = request.clone();
            if let Some(request) = request {
                ctx.submit_command(REQUEST_DATA.with(request).to(ctx.widget_id()));
            }
            ctx.children_changed();
        }
        if let Some(image) = self.image.as_mut() {
            image.update(ctx, data, env);
        } else {
            self.placeholder.update(ctx, data, env);
        }
    }

    fn layout(&mut self, ctx: &mut LayoutCtx, bc: &BoxConstraints, data: &T, env: &Env) -> Size {
        if let Some(image) = self.image.as_mut() {
            let size = image.layout(ctx, bc, data, env);
            image.set_origin(ctx, Point::ORIGIN);
            size
        } else {
            let size = self.placeholder.layout(ctx, bc, data, env);
            self.placeholder.set_origin(ctx, Point::ORIGIN);
            size
        }
    }

    fn paint(&mut self, ctx: &mut PaintCtx, data: &T, env: &Env) {
        if let Some(image) = self.image.as_mut() {
            image.paint(ctx, data, env)
        } else {
            self.placeholder.paint(ctx, data, env)
        }
    }
}
