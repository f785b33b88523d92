use crate::error::{Error, Result};
use crate::output::OutputSet;
use std::collections::HashSet;

/// Check constraints that can only be evaluated on the complete set.
///
/// The first violation found is reported.
pub(crate) fn check(outputs: &OutputSet) -> Result<()> {
    if outputs.is_empty() {
        return Err(Error::invalid("At least one output must be defined!"));
    }

    if outputs.prints.len() > 1 {
        return Err(Error::invalid("Multiple <print> outputs are not allowed!"));
    }

    // Names are shared by all kinds of outputs
    let mut names = HashSet::new();
    for output in outputs.iter() {
        if !names.insert(output.name()) {
            return Err(Error::invalid(format!(
                "Multiple outputs with the same name '{}'!",
                output.name()
            )));
        }
    }

    Ok(())
}
