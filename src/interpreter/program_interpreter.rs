use crate::codegen::{Backend, Operation, Program};

use super::{ExecutionError, Runtime};

/// Executes a `Program` directly against a `Runtime`. This is the reference
/// backend: loops test before every pass, cell and pointer arithmetic wrap,
/// and a finished run yields the entry point's status of 0.
pub struct ProgramInterpreter {
    runtime: Runtime,

    /// Optional budget for harnesses that need to run programs which may
    /// never terminate on their own. Every operation and every loop test
    /// costs one step.
    step_limit: Option<u64>,
    steps: u64,
}

impl ProgramInterpreter {
    pub fn new(runtime: Runtime) -> Self {
        Self {
            runtime,
            step_limit: None,
            steps: 0,
        }
    }

    pub fn with_step_limit(runtime: Runtime, limit: u64) -> Self {
        Self {
            runtime,
            step_limit: Some(limit),
            steps: 0,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn run(&mut self, program: &Program) -> Result<i32, ExecutionError> {
        self.steps = 0;
        self.run_block(program.operations())?;
        self.runtime.flush()?;
        Ok(0)
    }

    fn run_block(&mut self, operations: &[Operation]) -> Result<(), ExecutionError> {
        for operation in operations {
            match operation {
                Operation::CellDelta(amount) => {
                    self.tick()?;
                    self.runtime.add_to_cell(*amount);
                }
                Operation::PointerDelta(amount) => {
                    self.tick()?;
                    self.runtime.move_pointer(*amount);
                }
                Operation::Write => {
                    self.tick()?;
                    self.runtime.write_cell()?;
                }
                Operation::Read => {
                    self.tick()?;
                    self.runtime.read_cell()?;
                }
                Operation::Loop { body, .. } => loop {
                    // the test runs before the first pass and again after
                    // every pass; a cell already at zero skips the body
                    // entirely
                    self.tick()?;
                    if self.runtime.cell_is_zero() {
                        break;
                    }
                    self.run_block(body)?;
                },
            }
        }

        Ok(())
    }

    fn tick(&mut self) -> Result<(), ExecutionError> {
        self.steps += 1;
        if let Some(limit) = self.step_limit {
            if self.steps > limit {
                return Err(ExecutionError::StepLimitReached { limit });
            }
        }
        Ok(())
    }
}

impl Backend for ProgramInterpreter {
    type Artifact = i32;
    type Error = ExecutionError;

    fn consume(&mut self, program: &Program) -> Result<i32, ExecutionError> {
        self.run(program)
    }
}
