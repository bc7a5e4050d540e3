use std::{any::Any, collections::HashMap, marker::PhantomData};

use log::{debug, trace};

use crate::{
    packet::{
        error::PacketError,
        packet::{DropReason, PacketHandler, PacketOutcome},
        packet_kinds::{DecodedPacket, PacketKind},
        session::ReceivingContext,
    },
    protocol::Protocol,
};

type HandleFn<C> = fn(Box<dyn Any + Send>, &mut C) -> PacketOutcome;

fn handle_packet<C: ReceivingContext, P: PacketHandler<C>>(
    packet: Box<dyn Any + Send>,
    context: &mut C,
) -> PacketOutcome {
    let Ok(packet) = packet.downcast::<P>() else {
        return PacketOutcome::Dropped(DropReason::Unhandled { name: P::name() });
    };
    let packet = *packet;
    if !packet.is_valid(context) {
        return PacketOutcome::Dropped(DropReason::Invalid { name: P::name() });
    }
    packet.handle(context)
}

/// Routes decoded packets to the handlers one receiving host registered.
///
/// Each packet goes through: direction check, validity check, then its
/// handler. Whatever the handler does not apply is dropped; nothing is
/// reported back to the sender.
pub struct PacketDispatcher<C: ReceivingContext> {
    handlers: HashMap<PacketKind, HandleFn<C>>,
    phantom_c: PhantomData<C>,
}

impl<C: ReceivingContext> Default for PacketDispatcher<C> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            phantom_c: PhantomData,
        }
    }
}

impl<C: ReceivingContext> PacketDispatcher<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_handler<P: PacketHandler<C>>(&mut self) -> &mut Self {
        self.handlers
            .insert(PacketKind::of::<P>(), handle_packet::<C, P>);
        self
    }

    pub fn has_handler<P: PacketHandler<C>>(&self) -> bool {
        self.handlers.contains_key(&PacketKind::of::<P>())
    }

    /// Decodes `bytes` and runs the result through the pipeline. Only
    /// malformed input is an error; every rejection after decoding is a
    /// `PacketOutcome::Dropped`.
    pub fn receive(
        &self,
        protocol: &Protocol,
        bytes: &[u8],
        context: &mut C,
    ) -> Result<PacketOutcome, PacketError> {
        let decoded = protocol.decode(bytes)?;
        Ok(self.dispatch(decoded, context))
    }

    pub fn dispatch(&self, decoded: DecodedPacket, context: &mut C) -> PacketOutcome {
        let name = decoded.name();
        let direction = decoded.direction();
        let receiver = context.host_type();

        if !direction.can_receive(receiver) {
            debug!("dropping `{}`: wrong direction for {:?}", name, receiver);
            return PacketOutcome::Dropped(DropReason::WrongDirection {
                name,
                direction,
                receiver,
            });
        }

        let Some(handle) = self.handlers.get(&decoded.kind()) else {
            debug!("dropping `{}`: no handler registered", name);
            return PacketOutcome::Dropped(DropReason::Unhandled { name });
        };

        let outcome = handle(decoded.into_inner(), context);
        trace!("`{}` -> {:?}", name, outcome);
        outcome
    }
}
