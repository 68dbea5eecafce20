use druid::widget::{prelude::*, Controller};

use explorer_core::nav::Transition;

use crate::{cmd, data::AppState};

pub struct NavController;

impl NavController {
    fn unmount_previous(&self, ctx: &mut EventCtx, transition: Transition) {
        if transition.is_change() {
            ctx.submit_command(cmd::SCREEN_UNMOUNTED.with(transition.from));
        }
    }
}

impl<W> Controller<AppState, W> for NavController
where
    W: Widget<AppState>,
{
    fn event(
        &mut self,
        child: &mut W,
        ctx: &mut EventCtx,
        event: &Event,
        data: &mut AppState,
        env: &Env,
    ) {
        match event {
            Event::Command(cmd) if cmd.is(cmd::NAVIGATE) => {
                let screen = cmd.get_unchecked(cmd::NAVIGATE);
                let transition = data.navigate(screen);
                ctx.set_handled();
                self.unmount_previous(ctx, transition);
            }
            Event::Command(cmd) if cmd.is(cmd::NAVIGATE_BACK) => {
                let transition = data.navigate_back();
                ctx.set_handled();
                self.unmount_previous(ctx, transition);
            }
            Event::MouseDown(mouse) if mouse.button.is_x1() => {
                let transition = data.navigate_back();
                ctx.set_handled();
                self.unmount_previous(ctx, transition);
            }
            _ => {
                child.event(ctx, event, data, env);
            }
        }
    }
}
