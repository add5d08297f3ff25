use crate::output::Printer;
use reelguess_runtime::Services;

/// What every handler gets: the wired services and the stdout printer.
pub struct HandlerContext {
    pub services: Services,
    pub printer: Printer,
}

impl HandlerContext {
    pub fn new(services: Services, printer: Printer) -> Self {
        Self { services, printer }
    }
}
