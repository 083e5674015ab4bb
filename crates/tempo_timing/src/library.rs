//! Cell library: per-cell pin-to-pin delay tables.
//!
//! A [`CellLibrary`] maps a cell type name to its ordered list of
//! [`PinArc`]s. Lookups answer "what is the delay from input pin `X` of a
//! cell of type `T` to its output".

use crate::error::StaError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The delay annotated on a pin arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArcDelay {
    /// Propagation delay in time units.
    Delay(f64),
    /// The library marks the arc with `INF`: there is no timing relation
    /// between these pins, so a lookup that lands on it yields no delay.
    Disabled,
}

/// One input-pin to output-pin timing arc of a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinArc {
    /// Input pin name.
    pub input_pin: String,
    /// Output pin name.
    pub output_pin: String,
    /// Arc delay.
    pub delay: ArcDelay,
}

impl PinArc {
    /// Creates an enabled arc with the given delay.
    pub fn new(input_pin: impl Into<String>, output_pin: impl Into<String>, delay: f64) -> Self {
        Self {
            input_pin: input_pin.into(),
            output_pin: output_pin.into(),
            delay: ArcDelay::Delay(delay),
        }
    }

    /// Creates a disabled (`INF`) arc.
    pub fn disabled(input_pin: impl Into<String>, output_pin: impl Into<String>) -> Self {
        Self {
            input_pin: input_pin.into(),
            output_pin: output_pin.into(),
            delay: ArcDelay::Disabled,
        }
    }
}

/// A cell type and its timing arcs, in library order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSpec {
    /// Cell type name, unique within a library.
    pub name: String,
    /// Timing arcs in the order they were declared.
    pub arcs: Vec<PinArc>,
}

impl CellSpec {
    /// Creates a cell spec.
    pub fn new(name: impl Into<String>, arcs: Vec<PinArc>) -> Self {
        Self {
            name: name.into(),
            arcs,
        }
    }

    /// Delay of the first arc leaving `input_pin`.
    ///
    /// A cell may list several arcs for the same input pin (one per output);
    /// only the first one is ever observed. `None` when there is no such arc
    /// or the first one is disabled.
    pub fn arc_delay(&self, input_pin: &str) -> Option<f64> {
        let arc = self.arcs.iter().find(|arc| arc.input_pin == input_pin)?;
        match arc.delay {
            ArcDelay::Delay(d) => Some(d),
            ArcDelay::Disabled => None,
        }
    }
}

/// All cells available to one analysis run, indexed by name.
#[derive(Debug, Clone, Default)]
pub struct CellLibrary {
    cells: Vec<CellSpec>,
    index: HashMap<String, usize>,
}

impl CellLibrary {
    /// Builds a library, rejecting duplicate cell names.
    pub fn new(cells: Vec<CellSpec>) -> Result<Self, StaError> {
        let mut index = HashMap::with_capacity(cells.len());
        for (i, cell) in cells.iter().enumerate() {
            if index.insert(cell.name.clone(), i).is_some() {
                return Err(StaError::DuplicateCell(cell.name.clone()));
            }
        }
        Ok(Self { cells, index })
    }

    /// Returns the cell with the given name.
    pub fn cell(&self, name: &str) -> Option<&CellSpec> {
        self.index.get(name).map(|&i| &self.cells[i])
    }

    /// Delay from `input_pin` of a `cell_type` cell to its output.
    ///
    /// - An empty pin names a port with no internal delay: `0`, and the cell
    ///   type is not consulted.
    /// - An unregistered `cell_type` is an error.
    /// - A pin with no arc, or whose first arc is disabled, has no delay: `0`.
    pub fn delay_for(&self, cell_type: &str, input_pin: &str) -> Result<f64, StaError> {
        if input_pin.is_empty() {
            return Ok(0.0);
        }
        let cell = self
            .cell(cell_type)
            .ok_or_else(|| StaError::UnknownCellType(cell_type.to_string()))?;
        Ok(cell.arc_delay(input_pin).unwrap_or(0.0))
    }

    /// Iterates over cells in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &CellSpec> {
        self.cells.iter()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the library has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
