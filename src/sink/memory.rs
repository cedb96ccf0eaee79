use super::{OutputSink, SinkError};
use crate::analysis::{CapacitySeries, CurvePoint, CycleId, Derivative, DerivativePoint, EfficiencySeries};

/// Collects emitted results in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Last capacity series received
    pub capacities: Option<CapacitySeries>,
    /// Last efficiency series received
    pub efficiency: Option<EfficiencySeries>,
    /// Last whole-test curve received
    pub full_curve: Option<Vec<CurvePoint>>,
    /// Curves in emission order
    pub curves: Vec<(CycleId, Vec<CurvePoint>)>,
    /// Derivative curves in emission order
    pub derivatives: Vec<(CycleId, Derivative, Vec<DerivativePoint>)>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputSink for MemorySink {
    fn emit_capacities(&mut self, capacities: &CapacitySeries) -> Result<(), SinkError> {
        self.capacities = Some(capacities.clone());
        Ok(())
    }

    fn emit_efficiency(&mut self, efficiency: &EfficiencySeries) -> Result<(), SinkError> {
        self.efficiency = Some(efficiency.clone());
        Ok(())
    }

    fn emit_full_curve(&mut self, points: &[CurvePoint]) -> Result<(), SinkError> {
        self.full_curve = Some(points.to_vec());
        Ok(())
    }

    fn emit_curve(&mut self, id: CycleId, points: &[CurvePoint]) -> Result<(), SinkError> {
        self.curves.push((id, points.to_vec()));
        Ok(())
    }

    fn emit_derivative(
        &mut self,
        id: CycleId,
        derivative: Derivative,
        points: &[DerivativePoint],
    ) -> Result<(), SinkError> {
        self.derivatives.push((id, derivative, points.to_vec()));
        Ok(())
    }
}
