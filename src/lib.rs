//! # Terra Life
//!
//! A bounded, generation-stepped cellular automaton generalizing Conway's
//! Game of Life with static terrain cells.
//!
//! ## Features
//!
//! * Four cell kinds: empty, living, and static desert/water terrain
//! * Water counts toward its neighbors' live tallies without ever changing
//! * Optional drowning rule: a fully surrounded living cell turns into water
//! * Bounded, non-toroidal neighborhoods (edges have fewer neighbors)
//! * Deterministic whole-grid stepping with a monotonic generation counter
//! * Cumulative birth/death statistics
//!
//! The simulation is passive: a host owns the periodic timer and calls
//! [`Simulation::advance`] on each tick, [`Simulation::reset`] and
//! [`Simulation::resize`] on user input, and reads the grid back out for
//! rendering. The binary in this crate is one such host, a terminal
//! interface built on `ratatui`.

pub mod cell;
pub mod grid;
pub mod sim;

pub use cell::{Cell, CellState};
pub use grid::Grid;
pub use sim::{Rules, Simulation, Stats};
