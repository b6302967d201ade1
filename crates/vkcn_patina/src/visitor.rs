//! Rule execution over one component.
//!
//! Style blocks are visited first, in block order, then the template tags
//! carrying class attributes, in source order.

use crate::component::Component;
use crate::context::LintContext;
use crate::error::InvariantError;
use crate::rule::RuleEntry;

/// Visit the component and run all rules
pub struct LintVisitor<'a, 'ctx, 'rules> {
    ctx: &'ctx mut LintContext<'a>,
    rules: &'rules [RuleEntry],
}

impl<'a, 'ctx, 'rules> LintVisitor<'a, 'ctx, 'rules> {
    /// Create a new visitor
    #[inline]
    pub fn new(ctx: &'ctx mut LintContext<'a>, rules: &'rules [RuleEntry]) -> Self {
        Self { ctx, rules }
    }

    #[inline]
    fn enter_rule(&mut self, entry: &RuleEntry) {
        self.ctx.current_rule = entry.rule.meta().name;
        self.ctx.current_severity = entry.severity;
    }

    pub fn visit_component(&mut self, component: &Component<'a>) -> Result<(), InvariantError> {
        for style in &component.styles {
            for entry in self.rules {
                self.enter_rule(entry);
                entry.rule.check_style(self.ctx, component, style)?;
            }
        }

        for tag in &component.tags {
            for entry in self.rules {
                self.enter_rule(entry);
                entry.rule.check_tag(self.ctx, component, tag);
            }
        }
        Ok(())
    }
}
