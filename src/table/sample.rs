use serde::{Deserialize, Serialize};

use super::TableError;

/// One measurement row of a galvanostatic cycling test.
///
/// Units follow the EC-Lab export conventions: seconds, volts and mA·h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Time since test start (s)
    pub time_s: f64,

    /// Working-electrode voltage (V)
    pub voltage: f64,

    /// Control signal; positive while charging, negative while discharging
    pub control: f64,

    /// Step-program index (`Ns`)
    pub step: i64,

    /// Charge transferred since the previous sample (mA·h)
    pub dq: f64,

    /// Charge or discharge capacity accumulated within the current half-cycle (mA·h)
    pub capacity: f64,

    /// Capacity referenced to the start of the test, `(Q-Qo)` (mA·h)
    pub cumulative_capacity: f64,

    /// Half-cycle index assigned by the instrument
    pub half_cycle: i64,
}

impl Sample {
    /// Create a sample at `time_s` with the given voltage and half-cycle index.
    ///
    /// All charge fields start at zero, which makes the sample an open-circuit
    /// row until [`Sample::with_charge`] is applied.
    pub fn new(time_s: f64, voltage: f64, half_cycle: i64) -> Self {
        Self {
            time_s,
            voltage,
            control: 0.0,
            step: 0,
            dq: 0.0,
            capacity: 0.0,
            cumulative_capacity: 0.0,
            half_cycle,
        }
    }

    /// Set the control signal
    pub fn with_control(mut self, control: f64) -> Self {
        self.control = control;
        self
    }

    /// Set the step-program index
    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }

    /// Set the incremental charge and the within-cycle capacity
    pub fn with_charge(mut self, dq: f64, capacity: f64) -> Self {
        self.dq = dq;
        self.capacity = capacity;
        self
    }

    /// Set the capacity referenced to test start
    pub fn with_cumulative_capacity(mut self, cumulative_capacity: f64) -> Self {
        self.cumulative_capacity = cumulative_capacity;
        self
    }

    /// True when no charge moved since the previous sample (open-circuit rest).
    pub fn is_open_circuit(&self) -> bool {
        self.dq == 0.0
    }

    /// Check that every floating-point field is finite.
    pub fn validate_contract(&self, row: usize) -> Result<(), TableError> {
        let fields = [
            ("time_s", self.time_s),
            ("voltage", self.voltage),
            ("control", self.control),
            ("dq", self.dq),
            ("capacity", self.capacity),
            ("cumulative_capacity", self.cumulative_capacity),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(TableError::NonFinite { row, field, value });
            }
        }

        Ok(())
    }
}
