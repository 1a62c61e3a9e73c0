use std::future::Future;

use crate::domain::stack_check::entities::{RecentStack, StackCheckReport};

#[cfg_attr(test, mockall::automock)]
pub trait StackCheckService: Send + Sync {
    /// Resolves every name, checks each unordered pair of resolved names and
    /// attaches per-supplement facts.
    fn check_stack(&self, names: Vec<String>) -> impl Future<Output = StackCheckReport> + Send;

    fn recent_stacks(&self) -> Vec<RecentStack>;
}
