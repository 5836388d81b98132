#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;

use nuncio_saga::{Compensation, SagaStep};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TestError(pub String);

/// Records every action and lets a test choose which undos fail.
#[derive(Default)]
pub struct Journal {
    pub log: RefCell<Vec<String>>,
    pub failing_undos: HashSet<&'static str>,
}

impl Journal {
    pub fn failing(undos: &[&'static str]) -> Self {
        Self {
            log: RefCell::default(),
            failing_undos: undos.iter().copied().collect(),
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undo(pub &'static str);

impl Compensation<Journal> for Undo {
    type Error = TestError;

    fn description(&self) -> String {
        format!("undo {}", self.0)
    }

    fn compensate(&self, ctx: &Journal) -> Result<(), TestError> {
        if ctx.failing_undos.contains(self.0) {
            return Err(TestError(format!("cannot undo {}", self.0)));
        }
        ctx.log.borrow_mut().push(format!("undo {}", self.0));
        Ok(())
    }
}

/// A step that succeeds and registers an undo for itself.
pub struct Reversible(pub &'static str);

impl SagaStep for Reversible {
    type Context = Journal;
    type Error = TestError;
    type Compensation = Undo;

    fn name(&self) -> &'static str {
        self.0
    }

    fn execute(&self, ctx: &Journal) -> Result<Option<Undo>, TestError> {
        ctx.log.borrow_mut().push(format!("do {}", self.0));
        Ok(Some(Undo(self.0)))
    }
}

/// A step that succeeds without leaving anything to undo.
pub struct Irreversible(pub &'static str);

impl SagaStep for Irreversible {
    type Context = Journal;
    type Error = TestError;
    type Compensation = Undo;

    fn name(&self) -> &'static str {
        self.0
    }

    fn execute(&self, ctx: &Journal) -> Result<Option<Undo>, TestError> {
        ctx.log.borrow_mut().push(format!("do {}", self.0));
        Ok(None)
    }
}

/// A step that always fails.
pub struct Failing(pub &'static str);

impl SagaStep for Failing {
    type Context = Journal;
    type Error = TestError;
    type Compensation = Undo;

    fn name(&self) -> &'static str {
        self.0
    }

    fn execute(&self, ctx: &Journal) -> Result<Option<Undo>, TestError> {
        ctx.log.borrow_mut().push(format!("fail {}", self.0));
        Err(TestError(format!("{} failed", self.0)))
    }
}
