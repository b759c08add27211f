use rayon::prelude::*;

use crate::models::production::LINE_COUNT;

/// Solves the independent lines of a stage in parallel.
///
/// Outputs keep the order of `inputs`. If any line fails, one of the errors
/// is returned and the other outputs are discarded.
pub(crate) fn solve_lines<I, O, E, F>(inputs: &[I; LINE_COUNT], solve: F) -> Result<[O; LINE_COUNT], E>
where
    I: Sync,
    O: Send,
    E: Send,
    F: Fn(usize, &I) -> Result<O, E> + Sync,
{
    let outputs: Vec<O> = inputs
        .as_slice()
        .par_iter()
        .enumerate()
        .map(|(line, input)| solve(line, input))
        .collect::<Result<_, _>>()?;

    match outputs.try_into() {
        Ok(outputs) => Ok(outputs),
        Err(_) => unreachable!("one output is collected per input line"),
    }
}
