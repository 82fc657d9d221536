//! Session-scoped state: who is signed in, which (workspace, role) pair
//! the session currently acts under, and the resolution lifecycle around
//! both. Nothing here is persisted; the store owns the documents, this
//! module owns the in-flight and selected state.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

pub mod gate;
pub mod resolver;
pub mod selection;

use resolver::{ResolvedMembership, ResolvedMemberships};

/// Resolution outcome tracked per identity.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Resolution chain in flight; no role-gated view may be shown yet.
    Loading,
    /// Authenticated identity with no profile document provisioned.
    NotProvisioned,
    Ready(ResolvedMemberships),
}

/// Slots idle longer than this are swept on the next resolution pass.
/// Identities that drop off without signing out would otherwise hold a
/// slot for the process lifetime.
const SLOT_IDLE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct Slot {
    generation: u64,
    state: SessionState,
    active: Option<ResolvedMembership>,
    touched: Instant,
}

/// Handle for applying the outcome of one resolution pass. Stale tickets
/// (superseded by a later `begin` for the same identity) are rejected.
pub struct ResolutionTicket {
    identity: String,
    generation: u64,
}

/// Per-identity session slots. Selection writes come only from explicit
/// user action or the one-time default-selection step, so a plain RwLock
/// over the map is enough; no lock is held across awaits.
pub struct Sessions {
    slots: RwLock<HashMap<String, Slot>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Start a resolution pass for an identity. Bumps the slot generation
    /// so any earlier in-flight pass for the same identity becomes stale.
    /// An existing explicit selection survives re-resolution.
    pub fn begin(&self, identity: &str) -> ResolutionTicket {
        self.sweep_idle(SLOT_IDLE_TTL);

        let mut slots = self.slots.write().unwrap();
        let slot = slots.entry(identity.to_string()).or_insert(Slot {
            generation: 0,
            state: SessionState::Loading,
            active: None,
            touched: Instant::now(),
        });
        slot.generation += 1;
        slot.state = SessionState::Loading;
        slot.touched = Instant::now();

        ResolutionTicket {
            identity: identity.to_string(),
            generation: slot.generation,
        }
    }

    /// Apply a finished resolution. Returns false when the ticket is
    /// stale or the identity signed out mid-flight; the outcome must then
    /// be discarded, never applied.
    pub fn apply(&self, ticket: &ResolutionTicket, state: SessionState) -> bool {
        let mut slots = self.slots.write().unwrap();
        let Some(slot) = slots.get_mut(&ticket.identity) else {
            return false;
        };
        if slot.generation != ticket.generation {
            return false;
        }

        slot.state = state;
        slot.touched = Instant::now();
        true
    }

    /// Drop slots idle longer than `ttl`. Runs on every `begin` with
    /// [`SLOT_IDLE_TTL`]; tickets for a swept slot become stale, same as
    /// a sign-out.
    pub fn sweep_idle(&self, ttl: Duration) {
        let mut slots = self.slots.write().unwrap();
        slots.retain(|_, slot| slot.touched.elapsed() < ttl);
    }

    /// One-time default selection: a no-op whenever a selection already
    /// exists, so re-running it never clobbers an explicit user choice.
    pub fn select_default(&self, identity: &str, memberships: &[ResolvedMembership]) {
        let mut slots = self.slots.write().unwrap();
        if let Some(slot) = slots.get_mut(identity) {
            if slot.active.is_none() {
                slot.active = selection::select_default(memberships).cloned();
            }
        }
    }

    /// Explicit workspace switch.
    pub fn set_active(&self, identity: &str, membership: ResolvedMembership) {
        let mut slots = self.slots.write().unwrap();
        if let Some(slot) = slots.get_mut(identity) {
            slot.active = Some(membership);
        }
    }

    pub fn active(&self, identity: &str) -> Option<ResolvedMembership> {
        let slots = self.slots.read().unwrap();
        slots.get(identity).and_then(|slot| slot.active.clone())
    }

    pub fn state(&self, identity: &str) -> Option<SessionState> {
        let slots = self.slots.read().unwrap();
        slots.get(identity).map(|slot| slot.state.clone())
    }

    /// Sign-out: drop the slot wholesale. A later sign-in (same or
    /// different identity) starts from a clean Loading slot.
    pub fn sign_out(&self, identity: &str) {
        let mut slots = self.slots.write().unwrap();
        slots.remove(identity);
    }
}

impl Default for Sessions {
    fn default() -> Self {
        Self::new()
    }
}
