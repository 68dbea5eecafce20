use druid::{AppDelegate, Command, DelegateCtx, Env, Handled, Target, WindowId};

use explorer_core::loader::ImageLoader;

use crate::{cmd, data::AppState, widget::remote_image};

pub struct Delegate {
    main_window: Option<WindowId>,
    images: ImageLoader,
}

impl Delegate {
    pub fn new(images: ImageLoader) -> Self {
        Self {
            main_window: None,
            images,
        }
    }

    pub fn with_main(main_window: WindowId, images: ImageLoader) -> Self {
        let mut this = Self::new(images);
        this.main_window.replace(main_window);
        this
    }
}

impl AppDelegate<AppState> for Delegate {
    fn command(
        &mut self,
        ctx: &mut DelegateCtx,
        target: Target,
        cmd: &Command,
        _data: &mut AppState,
        _env: &Env,
    ) -> Handled {
        if let Some(instance) = cmd.get(cmd::SCREEN_UNMOUNTED) {
            self.images.cancel(*instance);
            Handled::Yes
        } else if let Handled::Yes = self.command_image(ctx, target, cmd) {
            Handled::Yes
        } else {
            Handled::No
        }
    }

    fn window_removed(
        &mut self,
        id: WindowId,
        _data: &mut AppState,
        _env: &Env,
        _ctx: &mut DelegateCtx,
    ) {
        if self.main_window == Some(id) {
            self.main_window.take();
            self.images.cancel_all();
        }
    }
}

impl Delegate {
    fn command_image(&mut self, ctx: &mut DelegateCtx, target: Target, cmd: &Command) -> Handled {
        if let Some(request) = cmd.get(remote_image::REQUEST_DATA).cloned() {
            let sink = ctx.get_external_handle();
            self.images.load(request, move |request, image| {
                let payload = remote_image::ImagePayload::new(request, &image);
                if let Err(err) = sink.submit_command(remote_image::PROVIDE_DATA, payload, target) {
                    log::warn!("failed to deliver image: {err:?}");
                }
            });
            Handled::Yes
        } else {
            Handled::No
        }
    }
}
