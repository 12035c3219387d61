//! In-memory index of open tickets and per-user cooldowns.
//!
//! Every method is synchronous. `TicketService` keeps the registry behind a
//! `std::sync::Mutex` and never holds the lock across an `.await`, so each call here is
//! one atomic step with respect to concurrent interactions.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};

use crate::{
    model::ticket::Priority,
    server::{
        error::{internal::InternalError, ticket::TicketError},
        model::ticket::Ticket,
    },
};

#[derive(Debug, Default)]
pub struct TicketRegistry {
    /// Open tickets keyed by channel id.
    tickets: HashMap<u64, Ticket>,
    /// Last ticket-open time per user.
    cooldowns: HashMap<u64, DateTime<Utc>>,
    /// Users whose ticket channel is being created right now.
    pending_opens: HashSet<u64>,
}

impl TicketRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a ticket under its channel id.
    ///
    /// # Returns
    /// - `Ok(Ticket)`: The registered ticket
    /// - `Err(InternalError::DuplicateTicket)`: The channel id is already registered
    pub fn create(&mut self, ticket: Ticket) -> Result<Ticket, InternalError> {
        if self.tickets.contains_key(&ticket.channel_id) {
            return Err(InternalError::DuplicateTicket(ticket.channel_id));
        }

        self.tickets.insert(ticket.channel_id, ticket.clone());

        Ok(ticket)
    }

    pub fn get(&self, channel_id: u64) -> Option<Ticket> {
        self.tickets.get(&channel_id).cloned()
    }

    /// Claims a ticket for `staff_id` if nobody holds it yet.
    ///
    /// # Returns
    /// - `Ok(Ticket)`: The ticket, now claimed by `staff_id`
    /// - `Err(TicketError::NotFound)`: No open ticket for the channel
    /// - `Err(TicketError::AlreadyClaimed)`: Another claim already succeeded
    pub fn claim(&mut self, channel_id: u64, staff_id: u64) -> Result<Ticket, TicketError> {
        let ticket = self
            .tickets
            .get_mut(&channel_id)
            .ok_or(TicketError::NotFound)?;

        if let Some(holder_id) = ticket.claimed_by {
            return Err(TicketError::AlreadyClaimed { holder_id });
        }

        ticket.claimed_by = Some(staff_id);

        Ok(ticket.clone())
    }

    pub fn set_priority(&mut self, channel_id: u64, priority: Priority) -> Option<Ticket> {
        let ticket = self.tickets.get_mut(&channel_id)?;
        ticket.priority = Some(priority);

        Some(ticket.clone())
    }

    /// Removes a ticket. Removing an absent channel is a no-op.
    pub fn remove(&mut self, channel_id: u64) -> Option<Ticket> {
        self.tickets.remove(&channel_id)
    }

    /// Removes a ticket only if `authorize` accepts it.
    ///
    /// # Returns
    /// - `Ok(Ticket)`: The removed ticket
    /// - `Err(TicketError::NotFound)`: No open ticket for the channel
    /// - `Err(_)`: Whatever `authorize` rejected with; the ticket stays registered
    pub fn take_if<F>(&mut self, channel_id: u64, authorize: F) -> Result<Ticket, TicketError>
    where
        F: FnOnce(&Ticket) -> Result<(), TicketError>,
    {
        let ticket = self.tickets.get(&channel_id).ok_or(TicketError::NotFound)?;
        authorize(ticket)?;

        self.tickets.remove(&channel_id).ok_or(TicketError::NotFound)
    }

    /// Channel of the open ticket belonging to `opener_id`, if any.
    pub fn find_by_opener(&self, opener_id: u64) -> Option<u64> {
        self.tickets
            .values()
            .find(|ticket| ticket.opener_id == opener_id)
            .map(|ticket| ticket.channel_id)
    }

    /// Reserves a ticket opening for `opener_id`.
    ///
    /// Checks for an existing ticket, an opening already in flight and the cooldown, in
    /// that order. On success the user is marked pending until `finish_open` or
    /// `abort_open`.
    pub fn begin_open(
        &mut self,
        opener_id: u64,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Result<(), TicketError> {
        if let Some(channel_id) = self.find_by_opener(opener_id) {
            return Err(TicketError::DuplicateTicket { channel_id });
        }

        if self.pending_opens.contains(&opener_id) {
            return Err(TicketError::OpenInProgress);
        }

        if let Some(remaining) = self.cooldown_remaining(opener_id, now, window) {
            let remaining_secs = (remaining.num_milliseconds() + 999) / 1000;
            return Err(TicketError::Cooldown { remaining_secs });
        }

        self.pending_opens.insert(opener_id);

        Ok(())
    }

    /// Registers the ticket of a reserved opening and starts the opener's cooldown.
    pub fn finish_open(
        &mut self,
        ticket: Ticket,
        now: DateTime<Utc>,
    ) -> Result<Ticket, InternalError> {
        self.pending_opens.remove(&ticket.opener_id);
        self.record_open(ticket.opener_id, now);

        self.create(ticket)
    }

    /// Releases a reservation after a failed opening. No cooldown is recorded.
    pub fn abort_open(&mut self, opener_id: u64) {
        self.pending_opens.remove(&opener_id);
    }

    pub fn record_open(&mut self, opener_id: u64, at: DateTime<Utc>) {
        self.cooldowns.insert(opener_id, at);
    }

    /// Time left before `opener_id` may open another ticket, `None` when allowed.
    pub fn cooldown_remaining(
        &self,
        opener_id: u64,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Option<Duration> {
        let last = self.cooldowns.get(&opener_id)?;
        let remaining = window - (now - *last);

        (remaining > Duration::zero()).then_some(remaining)
    }

    /// Drops cooldown entries that have expired, returning how many were removed.
    pub fn prune_cooldowns(&mut self, now: DateTime<Utc>, window: Duration) -> usize {
        let before = self.cooldowns.len();
        self.cooldowns.retain(|_, last| now - *last < window);

        before - self.cooldowns.len()
    }

    /// Bulk-loads tickets and cooldowns from the persisted snapshot.
    ///
    /// Entries already present are replaced.
    pub fn restore(&mut self, tickets: Vec<Ticket>, cooldowns: Vec<(u64, DateTime<Utc>)>) {
        for ticket in tickets {
            self.tickets.insert(ticket.channel_id, ticket);
        }
        self.cooldowns.extend(cooldowns);
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}
