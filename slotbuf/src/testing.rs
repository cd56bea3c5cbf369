//! Instrumented element types for unit tests.

use crate::{Element, Relocation};
use core::cell::Cell;
use std::rc::Rc;

/// Shared counters for every value created from it.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    created: Cell<usize>,
    clones: Cell<usize>,
    drops: Cell<usize>,
    clone_budget: Cell<Option<usize>>,
}

impl Tally {
    pub(crate) fn new() -> Rc<Tally> {
        Rc::new(Tally::default())
    }

    pub(crate) fn counted(self: &Rc<Self>, value: i32) -> Counted {
        self.created.set(self.created.get() + 1);
        Counted {
            value,
            tally: Rc::clone(self),
        }
    }

    pub(crate) fn copy_counted(self: &Rc<Self>, value: i32) -> CopyCounted {
        self.created.set(self.created.get() + 1);
        CopyCounted {
            value,
            tally: Rc::clone(self),
        }
    }

    /// Makes every clone after the next `n` panic.
    pub(crate) fn fail_clones_after(&self, n: usize) {
        self.clone_budget.set(Some(n));
    }

    pub(crate) fn allow_clones(&self) {
        self.clone_budget.set(None);
    }

    pub(crate) fn clones(&self) -> usize {
        self.clones.get()
    }

    pub(crate) fn drops(&self) -> usize {
        self.drops.get()
    }

    /// Values constructed (directly or by clone) and not yet dropped.
    pub(crate) fn live(&self) -> usize {
        self.created.get() - self.drops.get()
    }

    fn on_clone(&self) {
        if let Some(budget) = self.clone_budget.get() {
            if budget == 0 {
                panic!("clone budget exhausted");
            }
            self.clone_budget.set(Some(budget - 1));
        }
        self.clones.set(self.clones.get() + 1);
        self.created.set(self.created.get() + 1);
    }
}

macro_rules! counted_type {
    ($name:ident, $relocation:expr) => {
        #[derive(Debug)]
        pub(crate) struct $name {
            pub(crate) value: i32,
            tally: Rc<Tally>,
        }

        impl Clone for $name {
            fn clone(&self) -> Self {
                self.tally.on_clone();
                $name {
                    value: self.value,
                    tally: Rc::clone(&self.tally),
                }
            }
        }

        impl Drop for $name {
            fn drop(&mut self) {
                self.tally.drops.set(self.tally.drops.get() + 1);
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.value == other.value
            }
        }

        impl Element for $name {
            const RELOCATION: Relocation = $relocation;
        }
    };
}

counted_type!(Counted, Relocation::Move);
counted_type!(CopyCounted, Relocation::Copy);
