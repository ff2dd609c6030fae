use crate::error::{PlanviewError, Result};

/// Interactive choice among a presented list of options.
///
/// Implementations return the zero-based index of the chosen option; the
/// caller validates it against `options`.
pub trait Selector {
    fn choose(&self, prompt: &str, options: &[String]) -> Result<usize>;
}

/// Ask `selector` for one of `options`, rejecting out-of-range answers.
/// An empty `options` is an error, never a prompt.
pub fn pick<'o, S: Selector + ?Sized>(
    selector: &S,
    prompt: &str,
    options: &'o [String],
) -> Result<&'o str> {
    if options.is_empty() {
        return Err(PlanviewError::EmptyCatalog);
    }
    let index = selector.choose(prompt, options)?;
    options
        .get(index)
        .map(String::as_str)
        .ok_or(PlanviewError::InvalidSelection {
            index: index.saturating_add(1),
            len: options.len(),
        })
}

/// Parse a 1-based menu answer into a zero-based index.
pub fn parse_choice(input: &str, len: usize) -> Result<usize> {
    let number: usize = input
        .trim()
        .parse()
        .map_err(|_| PlanviewError::InvalidSelection { index: 0, len })?;
    if number == 0 || number > len {
        return Err(PlanviewError::InvalidSelection { index: number, len });
    }
    Ok(number - 1)
}
