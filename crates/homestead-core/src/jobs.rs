//! Job processors and the per-role slot arenas that hold them.
//!
//! A [`JobProcessor`] runs one recipe at a time:
//!
//! ```text
//! Idle --start--> Active --complete--> Idle   (output delivered)
//!                 Active --cancel-->   Idle   (inputs refunded)
//! ```
//!
//! Starting debits the inputs and reserves room for the output in the same
//! step; a job whose output fits nowhere never starts. Every piece of
//! stock movement goes through the [`Storehouse`], which keeps the
//! reservation ledger in step with the processors.
//!
//! [`JobSlots`] is the arena of processors for one crafting role, keyed by
//! [`JobSlotId`] handles in creation order.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use homestead_ledger::{CapacitySource, LedgerError, Storehouse};
use homestead_types::{CraftRole, JobRecord, JobSlotId, RecipeId, Resource, ReservedOutput};

use crate::recipes::recipe;

/// Why a job could not start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobError {
    /// The processor is already running a recipe.
    #[error("processor is busy with {0:?}")]
    Busy(RecipeId),

    /// The stockpile does not hold every input.
    #[error("missing inputs for {0:?}")]
    MissingInputs(RecipeId),

    /// The output fits neither its own slot nor the cellar.
    #[error("no room for {0}")]
    NoRoom(Resource),

    /// The ledger refused a debit.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },
}

// ---------------------------------------------------------------------------
// JobProcessor
// ---------------------------------------------------------------------------

/// One crafting station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobProcessor {
    current_recipe: Option<RecipeId>,
    progress: Decimal,
    worker_count: u32,
    reserved_inputs: BTreeMap<Resource, Decimal>,
    reserved_output: Option<ReservedOutput>,
}

impl Default for JobProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl JobProcessor {
    /// An idle processor with one worker.
    pub const fn new() -> Self {
        Self {
            current_recipe: None,
            progress: Decimal::ZERO,
            worker_count: 1,
            reserved_inputs: BTreeMap::new(),
            reserved_output: None,
        }
    }

    /// The recipe in progress, if any.
    pub const fn current_recipe(&self) -> Option<RecipeId> {
        self.current_recipe
    }

    /// Whether no recipe is in progress.
    pub const fn is_idle(&self) -> bool {
        self.current_recipe.is_none()
    }

    /// Work accumulated toward the current recipe.
    pub const fn progress(&self) -> Decimal {
        self.progress
    }

    /// Workers contributing per tick.
    pub const fn worker_count(&self) -> u32 {
        self.worker_count
    }

    /// Inputs debited for the current recipe.
    pub const fn reserved_inputs(&self) -> &BTreeMap<Resource, Decimal> {
        &self.reserved_inputs
    }

    /// Output reservation held for the current recipe.
    pub const fn reserved_output(&self) -> Option<&ReservedOutput> {
        self.reserved_output.as_ref()
    }

    /// Start `id`: check inputs, reserve room for the output, then debit
    /// the inputs.
    ///
    /// # Errors
    ///
    /// Fails without touching the storehouse when the processor is busy,
    /// an input is short, or the output fits nowhere.
    pub fn start(
        &mut self,
        id: RecipeId,
        store: &mut Storehouse,
        src: &impl CapacitySource,
    ) -> Result<(), JobError> {
        if let Some(busy) = self.current_recipe {
            return Err(JobError::Busy(busy));
        }
        let r = recipe(id);
        if !store.has_inputs(r.inputs) {
            return Err(JobError::MissingInputs(id));
        }
        let output = store
            .reserve_output(r.output, r.output_qty, src)
            .ok_or(JobError::NoRoom(r.output))?;
        if let Err(e) = store.debit_inputs(r.inputs) {
            store.release(output)?;
            return Err(e.into());
        }

        self.current_recipe = Some(id);
        self.progress = Decimal::ZERO;
        self.reserved_inputs = r.inputs.iter().copied().collect();
        self.reserved_output = Some(output);
        tracing::debug!(recipe = id.name(), destination = output.0.label(), "job started");
        Ok(())
    }

    /// Add one tick of work. No-op when idle.
    pub fn tick(&mut self, speed: Decimal) {
        if self.current_recipe.is_none() {
            return;
        }
        let work = speed.saturating_mul(Decimal::from(self.worker_count));
        self.progress = self.progress.saturating_add(work);
    }

    /// Deliver the output if enough work has been done. Returns the
    /// finished recipe.
    pub fn complete(&mut self, store: &mut Storehouse) -> Option<RecipeId> {
        let id = self.current_recipe?;
        if self.progress < recipe(id).work_time {
            return None;
        }
        let output = self.reserved_output?;
        if let Err(e) = store.deliver(output) {
            tracing::warn!(recipe = id.name(), error = %e, "delivered against a missing reservation");
        }
        self.reset();
        tracing::debug!(recipe = id.name(), "job completed");
        Some(id)
    }

    /// Abort the current recipe: refund inputs and release the output
    /// reservation. No-op when idle.
    pub fn cancel(&mut self, store: &mut Storehouse) {
        store.refund_inputs(&self.reserved_inputs);
        if let Some(output) = self.reserved_output {
            if let Err(e) = store.release(output) {
                tracing::warn!(error = %e, "cancelled job held no reservation");
            }
        }
        if let Some(id) = self.current_recipe {
            tracing::debug!(recipe = id.name(), "job cancelled");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.current_recipe = None;
        self.progress = Decimal::ZERO;
        self.reserved_inputs.clear();
        self.reserved_output = None;
    }

    /// Serialized form.
    pub fn to_record(&self) -> JobRecord {
        JobRecord {
            current_recipe: self.current_recipe,
            progress: self.progress,
            worker_count: self.worker_count,
            reserved_inputs: self.reserved_inputs.clone(),
            reserved_output: self.reserved_output,
        }
    }

    /// Restore from a serialized record.
    ///
    /// A record is only kept active when it names a recipe, holds an
    /// output reservation and lists the inputs it debited. Anything else
    /// comes back idle, so a processor never holds reservations without a
    /// recipe (or the reverse), and a later cancel has something to refund.
    pub fn from_record(record: JobRecord) -> Self {
        let worker_count = record.worker_count.max(1);
        match (record.current_recipe, record.reserved_output) {
            (Some(id), Some(output)) if !record.reserved_inputs.is_empty() => Self {
                current_recipe: Some(id),
                progress: record.progress.max(Decimal::ZERO),
                worker_count,
                reserved_inputs: record.reserved_inputs,
                reserved_output: Some(output),
            },
            (current, _) => {
                if let Some(id) = current {
                    tracing::warn!(
                        recipe = id.name(),
                        "job with incomplete reservations restored as idle"
                    );
                }
                Self {
                    worker_count,
                    ..Self::new()
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// JobSlots
// ---------------------------------------------------------------------------

/// The processors of one crafting role, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSlots {
    slots: BTreeMap<JobSlotId, JobProcessor>,
    next_id: JobSlotId,
}

impl Default for JobSlots {
    fn default() -> Self {
        Self::new()
    }
}

impl JobSlots {
    /// No slots.
    pub const fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
            next_id: JobSlotId::new(0),
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The processor behind `id`.
    pub fn get(&self, id: JobSlotId) -> Option<&JobProcessor> {
        self.slots.get(&id)
    }

    /// Processors, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (JobSlotId, &JobProcessor)> {
        self.slots.iter().map(|(id, p)| (*id, p))
    }

    /// Mutable processors, oldest first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut JobProcessor> {
        self.slots.values_mut()
    }

    /// Add a processor, returning its handle.
    pub fn push(&mut self, processor: JobProcessor) -> JobSlotId {
        let id = self.next_id;
        self.slots.insert(id, processor);
        self.next_id = id.next();
        id
    }

    /// Remove the newest slot, cancelling its job.
    pub fn remove_newest(&mut self, store: &mut Storehouse) -> Option<JobSlotId> {
        let (id, mut processor) = self.slots.pop_last()?;
        processor.cancel(store);
        Some(id)
    }

    /// Grow with idle processors or shrink from the newest end until there
    /// are exactly `desired` slots. Removed jobs are cancelled.
    pub fn resize(&mut self, desired: u64, store: &mut Storehouse) {
        let desired = usize::try_from(desired).unwrap_or(usize::MAX);
        while self.slots.len() > desired {
            if self.remove_newest(store).is_none() {
                break;
            }
        }
        while self.slots.len() < desired {
            self.push(JobProcessor::new());
        }
    }

    /// Output reservations held by every slot.
    pub fn outputs(&self) -> impl Iterator<Item = &ReservedOutput> {
        self.slots.values().filter_map(JobProcessor::reserved_output)
    }

    /// Serialized form, oldest first.
    pub fn to_records(&self) -> Vec<JobRecord> {
        self.slots.values().map(JobProcessor::to_record).collect()
    }

    /// Restore from serialized records, oldest first.
    pub fn from_records(records: Vec<JobRecord>) -> Self {
        let mut slots = Self::new();
        for record in records {
            slots.push(JobProcessor::from_record(record));
        }
        slots
    }
}

// ---------------------------------------------------------------------------
// JobBoard
// ---------------------------------------------------------------------------

/// The slot arenas of every crafting role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobBoard {
    weaver: JobSlots,
    bowyer: JobSlots,
    smithy: JobSlots,
    tailor: JobSlots,
}

impl JobBoard {
    /// No slots for anyone.
    pub const fn new() -> Self {
        Self {
            weaver: JobSlots::new(),
            bowyer: JobSlots::new(),
            smithy: JobSlots::new(),
            tailor: JobSlots::new(),
        }
    }

    /// The slots of `role`.
    pub const fn get(&self, role: CraftRole) -> &JobSlots {
        match role {
            CraftRole::Weaver => &self.weaver,
            CraftRole::Bowyer => &self.bowyer,
            CraftRole::Smithy => &self.smithy,
            CraftRole::Tailor => &self.tailor,
        }
    }

    /// The slots of `role`, mutably.
    pub const fn get_mut(&mut self, role: CraftRole) -> &mut JobSlots {
        match role {
            CraftRole::Weaver => &mut self.weaver,
            CraftRole::Bowyer => &mut self.bowyer,
            CraftRole::Smithy => &mut self.smithy,
            CraftRole::Tailor => &mut self.tailor,
        }
    }

    /// Output reservations held across every role.
    pub fn outputs(&self) -> impl Iterator<Item = &ReservedOutput> {
        CraftRole::ALL
            .into_iter()
            .flat_map(move |role| self.get(role).outputs())
    }
}
