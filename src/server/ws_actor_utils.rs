use actix_web_actors::ws;
use actix::ActorContext;
use serde_json::json;

use crate::server::anti_spam::{AntiSpamState, Verdict};
use crate::server::ws_error::ws_error_message;

/// Helpers shared by WebSocket actors that push text to a rate-limited client.
pub trait WsActorUtils {
    fn anti_spam(&mut self) -> &mut AntiSpamState;
    /// Identifier used in logs and error context.
    fn session_label(&self) -> String;

    /// Send a ban message, close the socket and stop the actor.
    fn send_ban_and_close<A>(&mut self, ctx: &mut ws::WebsocketContext<A>)
    where
        A: actix::Actor<Context = ws::WebsocketContext<A>>,
    {
        let context = json!({
            "session": self.session_label(),
            "ban_remaining_secs": self.anti_spam().ban_remaining_secs(),
        })
        .to_string();
        ctx.text(ws_error_message(
            "BANNED",
            "You have been banned for spamming. Please try again later.",
            Some(context.as_str()),
        ));
        ctx.close(Some(ws::CloseReason {
            code: ws::CloseCode::Policy,
            description: Some("Banned for spam".into()),
        }));
        ctx.stop();
    }

    /// Write `text` if the push budget allows it. The push that trips the
    /// budget is replaced by the ban message.
    fn push_text<A>(&mut self, ctx: &mut ws::WebsocketContext<A>, text: String)
    where
        A: actix::Actor<Context = ws::WebsocketContext<A>>,
    {
        match self.anti_spam().on_push() {
            Verdict::Pass => ctx.text(text),
            Verdict::Ban => self.send_ban_and_close(ctx),
            // Closing already.
            Verdict::Banned => (),
        }
    }

    /// Push an error frame unless it repeats the previous one.
    fn push_error<A>(
        &mut self,
        ctx: &mut ws::WebsocketContext<A>,
        code: &str,
        message: &str,
        context: Option<&str>,
    )
    where
        A: actix::Actor<Context = ws::WebsocketContext<A>>,
    {
        if self.anti_spam().admit_error(code) {
            self.push_text(ctx, ws_error_message(code, message, context));
        }
    }
}
