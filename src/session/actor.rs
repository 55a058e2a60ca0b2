use actix::prelude::*;
use log::info;

use super::{InputEvent, Session, SessionSnapshot, StrokePreview};
use crate::{data::Label, geometry::DataPoint, region::RegionCell};

/* -------------------------------------------------------------------------- */
/*                               Actix messages                               */
/* -------------------------------------------------------------------------- */

/// One discrete input event, applied in mailbox order.
#[derive(Message)]
#[rtype(result = "Option<StrokePreview>")]
pub struct Input(pub InputEvent);

#[derive(Message)]
#[rtype(result = "SessionSnapshot")]
pub struct Snapshot;

#[derive(Message)]
#[rtype(result = "Vec<RegionCell>")]
pub struct Regions;

#[derive(Message)]
#[rtype(result = "Option<Label>")]
pub struct Classify(pub DataPoint);

/* -------------------------------------------------------------------------- */
/*                                Session actor                               */
/* -------------------------------------------------------------------------- */

/// Sole owner of a [`Session`].
///
/// The mailbox serialises every event, so the session never sees two
/// writers and needs no locking.
pub struct SessionActor {
    session: Session,
}

impl SessionActor {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl Actor for SessionActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("session actor started");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!("session actor stopped");
    }
}

impl Handler<Input> for SessionActor {
    type Result = MessageResult<Input>;

    fn handle(&mut self, msg: Input, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.session.apply(msg.0))
    }
}

impl Handler<Snapshot> for SessionActor {
    type Result = MessageResult<Snapshot>;

    fn handle(&mut self, _msg: Snapshot, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.session.snapshot())
    }
}

impl Handler<Regions> for SessionActor {
    type Result = MessageResult<Regions>;

    fn handle(&mut self, _msg: Regions, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.session.regions())
    }
}

impl Handler<Classify> for SessionActor {
    type Result = MessageResult<Classify>;

    fn handle(&mut self, msg: Classify, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.session.classify(msg.0))
    }
}
