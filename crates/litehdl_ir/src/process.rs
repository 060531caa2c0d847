//! Combinational and clocked processes.

use crate::stmt::Statement;
use litehdl_common::{Ident, Logic};
use litehdl_source::Span;
use serde::{Deserialize, Serialize};

/// The active clock edge of a synchronous process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    /// `rising_edge(clk)`
    Rising,
    /// `falling_edge(clk)`
    Falling,
}

/// The reset of a synchronous process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reset {
    /// Reset signal.
    pub signal: Ident,
    /// Level at which the reset is asserted, `'1'` or `'0'`.
    pub active: Logic,
}

/// A VHDL process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Process {
    /// `process(all)`
    Combinational {
        /// Body.
        body: Vec<Statement>,
        /// Source location of the `comb` block.
        span: Span,
    },
    /// A process sensitive to its clock and optional reset.
    Synchronous {
        /// Clock signal.
        clock: Ident,
        /// Active edge.
        edge: Edge,
        /// Reset, if the block declared one.
        reset: Option<Reset>,
        /// Statements under the reset branch.
        reset_body: Vec<Statement>,
        /// Statements under the clock-edge branch.
        clock_body: Vec<Statement>,
        /// Source location of the `sync` block.
        span: Span,
    },
}

impl Process {
    /// Signals in the sensitivity list, or `None` for `process(all)`.
    pub fn sensitivity(&self) -> Option<Vec<Ident>> {
        match self {
            Process::Combinational { .. } => None,
            Process::Synchronous { clock, reset, .. } => {
                let mut signals = vec![*clock];
                signals.extend(reset.map(|r| r.signal));
                Some(signals)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitivity_lists() {
        let clk = Ident::from_raw(0);
        let rst = Ident::from_raw(1);
        let comb = Process::Combinational {
            body: Vec::new(),
            span: Span::DUMMY,
        };
        assert_eq!(comb.sensitivity(), None);

        let sync = Process::Synchronous {
            clock: clk,
            edge: Edge::Rising,
            reset: Some(Reset {
                signal: rst,
                active: Logic::One,
            }),
            reset_body: Vec::new(),
            clock_body: Vec::new(),
            span: Span::DUMMY,
        };
        assert_eq!(sync.sensitivity(), Some(vec![clk, rst]));
    }
}
