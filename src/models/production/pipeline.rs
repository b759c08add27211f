use twine_core::Model;

use crate::config::{Config, ReservoirConfig};

use super::{
    Flowline, FlowlineOutput, Reservoir, ReservoirOutput, StageError, Trunk, TrunkOutput, Well,
    WellOutput,
};

/// All four stages chained in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipeline {
    pub reservoir: Reservoir,
    pub well: Well,
    pub flowline: Flowline,
    pub trunk: Trunk,
}

/// Every stage's output from one [`Pipeline`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub reservoir: ReservoirOutput,
    pub wells: WellOutput,
    pub flowlines: FlowlineOutput,
    pub trunk: TrunkOutput,
}

impl Pipeline {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            reservoir: Reservoir::new(config),
            well: Well::new(config),
            flowline: Flowline::new(config),
            trunk: Trunk::new(config),
        }
    }
}

impl Model for Pipeline {
    type Input = ReservoirConfig;
    type Output = PipelineOutput;
    type Error = StageError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let reservoir = self.reservoir.call(input)?;
        let wells = self.well.call(&reservoir)?;
        let flowlines = self.flowline.call(&wells)?;
        let trunk = self.trunk.call(&flowlines)?;

        Ok(PipelineOutput {
            reservoir,
            wells,
            flowlines,
            trunk,
        })
    }
}
