//! Compilation context passed explicitly into every statement.
//!
//! A [`Session`] owns the unit being compiled, the registry of finished
//! units, the optional debugger and the external collaborators (expression
//! subsystem, query preparer).

pub mod config;
pub mod query;
pub mod unit;

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::bytecode::disasm;
use crate::debugger::Debugger;
use crate::lang::expr::{Arithmetic, Expressions};

pub use config::SessionConfig;
pub use query::{PreparedQuery, QueryKind, QueryPreparer};
pub use unit::{Pragma, Program};

/// Name given to a unit that finished without any entry declaration.
pub const MAIN_UNIT: &str = "$MAIN";

pub struct Session {
    config: SessionConfig,
    active: Option<Program>,
    units: BTreeMap<String, Program>,
    default_unit: Option<String>,
    current_name: Option<String>,
    debugger: Option<Debugger>,
    expressions: Box<dyn Expressions>,
    query: Option<Box<dyn QueryPreparer>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            active: None,
            units: BTreeMap::new(),
            default_unit: None,
            current_name: None,
            debugger: None,
            expressions: Box::new(Arithmetic),
            query: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn with_expressions(mut self, expressions: Box<dyn Expressions>) -> Self {
        self.expressions = expressions;
        self
    }

    pub fn expressions(&self) -> &dyn Expressions {
        self.expressions.as_ref()
    }

    // =========================================================================
    // Query preparer
    // =========================================================================

    pub fn bind_query_preparer(&mut self, preparer: Box<dyn QueryPreparer>) {
        self.query = Some(preparer);
    }

    pub fn query_preparer(&mut self) -> Option<&mut (dyn QueryPreparer + 'static)> {
        self.query.as_deref_mut()
    }

    // =========================================================================
    // Debugger
    // =========================================================================

    pub fn attach_debugger(&mut self, debugger: Debugger) {
        self.debugger = Some(debugger);
    }

    pub fn detach_debugger(&mut self) -> Option<Debugger> {
        self.debugger.take()
    }

    pub fn debugger(&self) -> Option<&Debugger> {
        self.debugger.as_ref()
    }

    pub fn debugger_mut(&mut self) -> Option<&mut Debugger> {
        self.debugger.as_mut()
    }

    // =========================================================================
    // Units
    // =========================================================================

    /// Start compiling a new, unnamed unit. Any unit still active is dropped.
    pub fn begin_unit(&mut self) {
        if self.active.is_some() {
            warn!("discarding unfinished unit");
        }
        self.active = Some(Program::new());
    }

    pub fn active_unit(&self) -> Option<&Program> {
        self.active.as_ref()
    }

    pub fn active_unit_mut(&mut self) -> Option<&mut Program> {
        self.active.as_mut()
    }

    /// Discard the active unit without registering it.
    pub fn abandon_unit(&mut self) -> Option<Program> {
        self.active.take()
    }

    /// Register the active unit and make it the session default.
    /// Returns the registered name.
    pub fn finish_unit(&mut self) -> Option<String> {
        let mut unit = self.active.take()?;

        let name = match unit.name() {
            Some(name) => name.to_string(),
            None => {
                let name = self
                    .current_name
                    .clone()
                    .unwrap_or_else(|| MAIN_UNIT.to_string());
                unit.set_name(&name);
                name
            }
        };

        if self.config.trace_bytecode {
            debug!(unit = %name, "\n{}", disasm::format_unit(&unit));
        }
        if self.units.insert(name.clone(), unit).is_some() {
            warn!(unit = %name, "redefining unit");
        }
        info!(unit = %name, "unit registered");

        self.default_unit = Some(name.clone());
        Some(name)
    }

    pub fn unit(&self, name: &str) -> Option<&Program> {
        self.units.get(name)
    }

    pub fn unit_names(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    pub fn default_unit(&self) -> Option<&Program> {
        self.default_unit
            .as_deref()
            .and_then(|name| self.units.get(name))
    }

    /// Make a registered unit the fallback for statements compiled outside
    /// any active unit. Returns false if no such unit exists.
    pub fn set_default_unit(&mut self, name: &str) -> bool {
        if self.units.contains_key(name) {
            self.default_unit = Some(name.to_string());
            true
        } else {
            false
        }
    }

    pub fn has_unit_context(&self) -> bool {
        self.active.is_some() || self.default_unit().is_some()
    }

    /// The unit currently being compiled, else the session default.
    pub fn resolve_unit_mut(&mut self) -> Option<&mut Program> {
        if self.active.is_some() {
            return self.active.as_mut();
        }
        let name = self.default_unit.as_deref()?;
        self.units.get_mut(name)
    }

    pub fn current_unit_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    pub fn set_current_unit_name(&mut self, name: &str) {
        self.current_name = Some(name.to_string());
    }
}
