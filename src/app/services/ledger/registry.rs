//! Handler and shed registry
//!
//! Handlers and sheds are looked up by name and number, the same keys the
//! batch inputs use. A handler or shed that still has batches on record can
//! be neither removed nor renamed, so the history never points at a missing
//! entry.

use super::book::BatchLedger;
use crate::app::models::{Handler, HandlerChanges, Shed, ShedChanges};
use crate::error::{LedgerError, Result, Violation};
use chrono::Utc;
use tracing::info;

fn handler_not_found(name: &str) -> LedgerError {
    LedgerError::HandlerNotFound {
        handler_name: name.to_string(),
    }
}

fn shed_not_found(number: &str) -> LedgerError {
    LedgerError::ShedNotFound {
        shed_number: number.to_string(),
    }
}

fn check_handler(handler: &Handler) -> Result<()> {
    if handler.name.trim().is_empty() {
        return Err(LedgerError::invalid("name", "is required"));
    }
    Ok(())
}

fn check_shed(shed: &Shed) -> Result<()> {
    let mut violations = Vec::new();
    if shed.number.trim().is_empty() {
        violations.push(Violation::new("number", "is required"));
    }
    if shed.capacity == Some(0) {
        violations.push(Violation::new("capacity", "must be greater than 0"));
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(LedgerError::Validation { violations })
    }
}

impl BatchLedger {
    /// Registered handlers, sorted by name
    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    fn handler_position(&self, name: &str) -> Option<usize> {
        self.handlers.iter().position(|handler| handler.name == name)
    }

    pub fn get_handler(&self, name: &str) -> Result<&Handler> {
        self.handler_position(name)
            .map(|index| &self.handlers[index])
            .ok_or_else(|| handler_not_found(name))
    }

    /// Register a handler name seen on a batch, if it is new
    pub(super) fn ensure_handler(&mut self, name: &str) {
        if self.handler_position(name).is_none() {
            info!("Registered handler {}", name);
            self.insert_handler(Handler::new(name));
        }
    }

    fn insert_handler(&mut self, handler: Handler) -> usize {
        let index = self
            .handlers
            .partition_point(|existing| existing.name < handler.name);
        self.handlers.insert(index, handler);
        index
    }

    pub fn register_handler(&mut self, handler: Handler) -> Result<&Handler> {
        check_handler(&handler)?;
        if self.handler_position(&handler.name).is_some() {
            return Err(LedgerError::DuplicateHandler {
                handler_name: handler.name,
            });
        }

        info!("Registered handler {}", handler.name);
        let index = self.insert_handler(handler);
        Ok(&self.handlers[index])
    }

    /// Apply a partial edit. Renaming is refused while batches name the handler.
    pub fn update_handler(&mut self, name: &str, changes: HandlerChanges) -> Result<&Handler> {
        let index = self
            .handler_position(name)
            .ok_or_else(|| handler_not_found(name))?;

        let mut handler = self.handlers[index].clone();
        if let Some(new_name) = changes.name.filter(|new_name| new_name != name) {
            if self.handler_position(&new_name).is_some() {
                return Err(LedgerError::DuplicateHandler {
                    handler_name: new_name,
                });
            }
            let batch_count = self.batches_for_handler(name);
            if batch_count > 0 {
                return Err(LedgerError::HandlerInUse {
                    handler_name: name.to_string(),
                    batch_count,
                });
            }
            handler.name = new_name;
        }
        if changes.email.is_some() {
            handler.email = changes.email;
        }
        if changes.phone.is_some() {
            handler.phone = changes.phone;
        }
        if changes.notes.is_some() {
            handler.notes = changes.notes;
        }
        check_handler(&handler)?;
        handler.updated_at = Some(Utc::now());

        self.handlers.remove(index);
        info!("Updated handler {}", handler.name);
        let index = self.insert_handler(handler);
        Ok(&self.handlers[index])
    }

    /// Remove a handler that has no batches on record
    pub fn remove_handler(&mut self, name: &str) -> Result<Handler> {
        let index = self
            .handler_position(name)
            .ok_or_else(|| handler_not_found(name))?;
        let batch_count = self.batches_for_handler(name);
        if batch_count > 0 {
            return Err(LedgerError::HandlerInUse {
                handler_name: name.to_string(),
                batch_count,
            });
        }

        info!("Removed handler {}", name);
        Ok(self.handlers.remove(index))
    }

    /// Registered sheds, sorted by number
    pub fn sheds(&self) -> &[Shed] {
        &self.sheds
    }

    fn shed_position(&self, number: &str) -> Option<usize> {
        self.sheds.iter().position(|shed| shed.number == number)
    }

    pub fn get_shed(&self, number: &str) -> Result<&Shed> {
        self.shed_position(number)
            .map(|index| &self.sheds[index])
            .ok_or_else(|| shed_not_found(number))
    }

    fn insert_shed(&mut self, shed: Shed) -> usize {
        let index = self
            .sheds
            .partition_point(|existing| existing.number < shed.number);
        self.sheds.insert(index, shed);
        index
    }

    pub fn register_shed(&mut self, shed: Shed) -> Result<&Shed> {
        check_shed(&shed)?;
        if self.shed_position(&shed.number).is_some() {
            return Err(LedgerError::DuplicateShed {
                shed_number: shed.number,
            });
        }

        info!("Registered shed {} ({})", shed.number, shed.status);
        let index = self.insert_shed(shed);
        Ok(&self.sheds[index])
    }

    /// Apply a partial edit. Renumbering is refused while batches name the shed.
    pub fn update_shed(&mut self, number: &str, changes: ShedChanges) -> Result<&Shed> {
        let index = self
            .shed_position(number)
            .ok_or_else(|| shed_not_found(number))?;

        let mut shed = self.sheds[index].clone();
        if let Some(new_number) = changes.number.filter(|new_number| new_number != number) {
            if self.shed_position(&new_number).is_some() {
                return Err(LedgerError::DuplicateShed {
                    shed_number: new_number,
                });
            }
            let batch_count = self.batches_in_shed(number);
            if batch_count > 0 {
                return Err(LedgerError::ShedInUse {
                    shed_number: number.to_string(),
                    batch_count,
                });
            }
            shed.number = new_number;
        }
        if changes.capacity.is_some() {
            shed.capacity = changes.capacity;
        }
        if changes.location.is_some() {
            shed.location = changes.location;
        }
        if let Some(status) = changes.status {
            shed.status = status;
        }
        if changes.notes.is_some() {
            shed.notes = changes.notes;
        }
        check_shed(&shed)?;
        shed.updated_at = Some(Utc::now());

        self.sheds.remove(index);
        info!("Updated shed {} ({})", shed.number, shed.status);
        let index = self.insert_shed(shed);
        Ok(&self.sheds[index])
    }

    /// Remove a shed that has no batches on record
    pub fn remove_shed(&mut self, number: &str) -> Result<Shed> {
        let index = self
            .shed_position(number)
            .ok_or_else(|| shed_not_found(number))?;
        let batch_count = self.batches_in_shed(number);
        if batch_count > 0 {
            return Err(LedgerError::ShedInUse {
                shed_number: number.to_string(),
                batch_count,
            });
        }

        info!("Removed shed {}", number);
        Ok(self.sheds.remove(index))
    }
}
