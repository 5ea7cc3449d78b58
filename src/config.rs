/// Arena and execution tuning, populated from CLI flags. Kept as a
/// separate struct (rather than threading raw flags through `main`)
/// so non-CLI callers (tests, a future embedding) can construct a run
/// the same way the binary does.
#[derive(Debug, Clone)]
pub struct Config {
    pub page_size: usize,
    pub initial_pages: usize,
    pub iteration_guard: usize,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            page_size: 4096,
            initial_pages: 1,
            iteration_guard: core::DEFAULT_ITERATION_GUARD,
            color: true,
        }
    }
}
