//! Statement printing.
//!
//! A statement never writes its own leading line break: the enclosing block
//! or body breaks the line and indents before handing over.

use crate::{grow, PResult, Printer};
use jast_ast::{
    Assert, Block, Case, CaseItem, CaseValue, CatchClause, DoWhile, ExpressionStmt, For, ForEach, ForInit, Identifier, If,
    Labeled, LocalVariableDeclaration, Match, Resource, Return, RuleLabel, Stmt, Switch, SwitchBlock, SwitchExprRule,
    SwitchGroup, SwitchLabel, Synchronized, Throw, Try, TryResource, TryWithResources, While, Yield,
};
use jast_diagnostics::UnparseError;
use std::sync::Arc;

impl Printer {
    pub(crate) fn stmt(&mut self, stmt: &Stmt) -> PResult {
        grow(|| self.stmt_in_place(stmt))
    }

    fn stmt_in_place(&mut self, stmt: &Stmt) -> PResult {
        match stmt {
            Stmt::Empty(_) => self.write(";"),
            Stmt::Block(n) => self.block(&n.body)?,
            Stmt::LocalType(n) => self.decl(&n.decl)?,
            Stmt::LocalVariable(n) => self.local_variable_statement(n)?,
            Stmt::Labeled(n) => self.labeled(n)?,
            Stmt::Expression(n) => self.expression_statement(n)?,
            Stmt::If(n) => self.if_statement(n)?,
            Stmt::Assert(n) => self.assert(n)?,
            Stmt::Switch(n) => self.switch(n)?,
            Stmt::While(n) => self.while_statement(n)?,
            Stmt::DoWhile(n) => self.do_while(n)?,
            Stmt::For(n) => self.for_statement(n)?,
            Stmt::ForEach(n) => self.for_each(n)?,
            Stmt::Break(n) => self.jump("break", n.label.as_ref()),
            Stmt::Continue(n) => self.jump("continue", n.label.as_ref()),
            Stmt::Return(n) => self.return_statement(n)?,
            Stmt::Throw(n) => self.throw(n)?,
            Stmt::Synchronized(n) => self.synchronized(n)?,
            Stmt::Try(n) => self.try_statement(n)?,
            Stmt::TryWithResources(n) => self.try_with_resources(n)?,
            Stmt::Yield(n) => self.yield_statement(n)?,
        }
        Ok(())
    }

    /// `{}` when empty, otherwise one statement per line.
    pub(crate) fn block(&mut self, body: &[Arc<Stmt>]) -> PResult {
        if body.is_empty() {
            self.write("{}");
            return Ok(());
        }
        self.write("{");
        self.statements(body)?;
        self.write_newline();
        self.write("}");
        Ok(())
    }

    /// Statements one level deeper, each on its own line.
    fn statements(&mut self, body: &[Arc<Stmt>]) -> PResult {
        self.increase_indent();
        for stmt in body {
            self.write_newline();
            self.stmt(stmt)?;
        }
        self.decrease_indent();
        Ok(())
    }

    /// The body of a control statement: a block stays on the header line,
    /// anything else goes on the next line one level deeper.
    fn body(&mut self, body: &Stmt) -> PResult {
        match body {
            Stmt::Block(block) => {
                self.write(" ");
                self.block(&block.body)
            }
            _ => {
                self.increase_indent();
                self.write_newline();
                self.stmt(body)?;
                self.decrease_indent();
                Ok(())
            }
        }
    }

    /// Whether `stmt` ends in an `if` without `else` that would capture a
    /// following `else`.
    fn ends_in_open_if(stmt: &Stmt) -> bool {
        match stmt {
            Stmt::If(n) => match &n.orelse {
                None => true,
                Some(orelse) => Self::ends_in_open_if(orelse),
            },
            Stmt::While(n) => Self::ends_in_open_if(&n.body),
            Stmt::For(n) => Self::ends_in_open_if(&n.body),
            Stmt::ForEach(n) => Self::ends_in_open_if(&n.body),
            Stmt::Labeled(n) => Self::ends_in_open_if(&n.body),
            _ => false,
        }
    }

    // ========================================================================
    // Simple statements
    // ========================================================================

    pub(crate) fn local_variable_statement(&mut self, node: &LocalVariableDeclaration) -> PResult {
        self.local_variable(node)?;
        self.write(";");
        Ok(())
    }

    /// `final int a = 1, b` without the terminating semicolon.
    pub(crate) fn local_variable(&mut self, node: &LocalVariableDeclaration) -> PResult {
        self.modifiers(&node.modifiers)?;
        self.ty(&node.ty)?;
        self.write(" ");
        self.variable_declarators(&node.declarators)
    }

    pub(crate) fn expression_statement(&mut self, node: &ExpressionStmt) -> PResult {
        self.top_expr(&node.value)?;
        self.write(";");
        Ok(())
    }

    pub(crate) fn labeled(&mut self, node: &Labeled) -> PResult {
        self.write(node.label.as_str());
        self.write(":");
        self.write_newline();
        self.stmt(&node.body)
    }

    pub(crate) fn assert(&mut self, node: &Assert) -> PResult {
        self.write("assert ");
        self.top_expr(&node.test)?;
        if let Some(msg) = &node.msg {
            self.write(" : ");
            self.top_expr(msg)?;
        }
        self.write(";");
        Ok(())
    }

    pub(crate) fn jump(&mut self, keyword: &str, label: Option<&Identifier>) {
        self.write(keyword);
        if let Some(label) = label {
            self.write(" ");
            self.write(label.as_str());
        }
        self.write(";");
    }

    pub(crate) fn return_statement(&mut self, node: &Return) -> PResult {
        self.write("return");
        if let Some(value) = &node.value {
            self.write(" ");
            self.top_expr(value)?;
        }
        self.write(";");
        Ok(())
    }

    pub(crate) fn throw(&mut self, node: &Throw) -> PResult {
        self.write("throw ");
        self.top_expr(&node.exc)?;
        self.write(";");
        Ok(())
    }

    pub(crate) fn yield_statement(&mut self, node: &Yield) -> PResult {
        self.write("yield ");
        self.top_expr(&node.value)?;
        self.write(";");
        Ok(())
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    pub(crate) fn if_statement(&mut self, node: &If) -> PResult {
        self.write("if (");
        self.top_expr(&node.test)?;
        self.write(")");
        let Some(orelse) = &node.orelse else {
            return self.body(&node.body);
        };
        // an open inner `if` would capture the `else`
        let braced = Self::ends_in_open_if(&node.body);
        if braced {
            self.write(" ");
            self.block(std::slice::from_ref(&node.body))?;
        } else {
            self.body(&node.body)?;
        }
        if braced || matches!(node.body.as_ref(), Stmt::Block(_)) {
            self.write(" ");
        } else {
            self.write_newline();
        }
        self.write("else");
        match orelse.as_ref() {
            Stmt::If(chained) => {
                self.write(" ");
                self.if_statement(chained)
            }
            other => self.body(other),
        }
    }

    pub(crate) fn while_statement(&mut self, node: &While) -> PResult {
        self.write("while (");
        self.top_expr(&node.test)?;
        self.write(")");
        self.body(&node.body)
    }

    /// The `while` goes on the line after the body.
    pub(crate) fn do_while(&mut self, node: &DoWhile) -> PResult {
        self.write("do");
        self.body(&node.body)?;
        self.write_newline();
        self.write("while (");
        self.top_expr(&node.test)?;
        self.write(");");
        Ok(())
    }

    pub(crate) fn for_statement(&mut self, node: &For) -> PResult {
        self.write("for (");
        match &node.init {
            Some(ForInit::LocalVariable(local)) => self.local_variable(local)?,
            Some(ForInit::Expressions(exprs)) => self.expr_list(exprs)?,
            None => {}
        }
        self.write(";");
        if let Some(test) = &node.test {
            self.write(" ");
            self.top_expr(test)?;
        }
        self.write(";");
        if !node.update.is_empty() {
            self.write(" ");
            self.expr_list(&node.update)?;
        }
        self.write(")");
        self.body(&node.body)
    }

    pub(crate) fn for_each(&mut self, node: &ForEach) -> PResult {
        self.write("for (");
        self.modifiers(&node.modifiers)?;
        self.ty(&node.ty)?;
        self.write(" ");
        self.variable_declarator_id(&node.id)?;
        self.write(" : ");
        self.top_expr(&node.iter)?;
        self.write(")");
        self.body(&node.body)
    }

    pub(crate) fn synchronized(&mut self, node: &Synchronized) -> PResult {
        self.write("synchronized (");
        self.top_expr(&node.lock)?;
        self.write(") ");
        self.block(&node.body.body)
    }

    // ========================================================================
    // Switch
    // ========================================================================

    pub(crate) fn switch(&mut self, node: &Switch) -> PResult {
        self.write("switch (");
        self.top_expr(&node.value)?;
        self.write(") ");
        self.switch_block(&node.body)
    }

    pub(crate) fn switch_block(&mut self, node: &SwitchBlock) -> PResult {
        if !node.rules.is_empty() {
            if !node.groups.is_empty() || !node.labels.is_empty() {
                return Err(UnparseError::new("SwitchBlock", "rules cannot be mixed with groups"));
            }
            return self.switch_rules(&node.rules);
        }
        if node.groups.is_empty() && node.labels.is_empty() {
            self.write("{}");
            return Ok(());
        }
        self.write("{");
        self.increase_indent();
        for group in &node.groups {
            self.write_newline();
            self.switch_group(group)?;
        }
        for label in &node.labels {
            self.write_newline();
            self.switch_label(label)?;
        }
        self.decrease_indent();
        self.write_newline();
        self.write("}");
        Ok(())
    }

    /// Labels one per line, the statements one level deeper.
    pub(crate) fn switch_group(&mut self, node: &SwitchGroup) -> PResult {
        for (i, label) in node.labels.iter().enumerate() {
            if i > 0 {
                self.write_newline();
            }
            self.switch_label(label)?;
        }
        self.statements(&node.body)
    }

    fn switch_label(&mut self, label: &SwitchLabel) -> PResult {
        match label {
            SwitchLabel::Case(case) => self.case(case),
            SwitchLabel::Default(_) => {
                self.write("default:");
                Ok(())
            }
        }
    }

    pub(crate) fn case(&mut self, node: &Case) -> PResult {
        self.write("case ");
        match &node.value {
            CaseValue::Expr(value) => self.top_expr(value)?,
            CaseValue::Match(value) => self.match_(value)?,
        }
        self.write(":");
        Ok(())
    }

    pub(crate) fn match_(&mut self, node: &Match) -> PResult {
        self.ty(&node.ty)?;
        self.write(" ");
        self.write(node.id.as_str());
        Ok(())
    }

    /// `{ rule rule }`, one rule per line.
    pub(crate) fn switch_rules(&mut self, rules: &[SwitchExprRule]) -> PResult {
        if rules.is_empty() {
            self.write("{}");
            return Ok(());
        }
        self.write("{");
        self.increase_indent();
        for rule in rules {
            self.write_newline();
            self.switch_rule(rule)?;
        }
        self.decrease_indent();
        self.write_newline();
        self.write("}");
        Ok(())
    }

    /// `case a, b -> body` or `case a, b:` followed by its statements.
    pub(crate) fn switch_rule(&mut self, node: &SwitchExprRule) -> PResult {
        match node.label {
            RuleLabel::Case => {
                if node.cases.is_empty() {
                    return Err(UnparseError::new("SwitchExprRule", "a case rule needs at least one item"));
                }
                self.write("case ");
                self.write_list(&node.cases, ", ", |p, item| p.case_item(item))?;
            }
            RuleLabel::Default => self.write("default"),
        }
        if !node.arrow {
            self.write(":");
            return self.statements(&node.body);
        }
        let [body] = node.body.as_slice() else {
            return Err(UnparseError::new(
                "SwitchExprRule",
                format!("an arrow rule takes one statement, found {}", node.body.len()),
            ));
        };
        self.write(" -> ");
        self.stmt(body)
    }

    fn case_item(&mut self, item: &CaseItem) -> PResult {
        match item {
            CaseItem::Expr(value) => self.top_expr(value),
            CaseItem::Pattern(pattern) => self.guarded_pattern(pattern),
        }
    }

    // ========================================================================
    // Try
    // ========================================================================

    pub(crate) fn try_statement(&mut self, node: &Try) -> PResult {
        self.write("try ");
        self.block(&node.body.body)?;
        self.handlers(&node.catches, node.finally.as_ref())
    }

    pub(crate) fn try_with_resources(&mut self, node: &TryWithResources) -> PResult {
        self.write("try (");
        self.write_list(&node.resources, "; ", |p, resource| match resource {
            TryResource::Declared(resource) => p.resource(resource),
            TryResource::Name(name) => {
                p.qualified_name(name);
                Ok(())
            }
        })?;
        self.write(") ");
        self.block(&node.body.body)?;
        self.handlers(&node.catches, node.finally.as_ref())
    }

    fn handlers(&mut self, catches: &[CatchClause], finally: Option<&Block>) -> PResult {
        for catch in catches {
            self.write(" ");
            self.catch_clause(catch)?;
        }
        if let Some(finally) = finally {
            self.write(" finally ");
            self.block(&finally.body)?;
        }
        Ok(())
    }

    pub(crate) fn catch_clause(&mut self, node: &CatchClause) -> PResult {
        self.write("catch (");
        self.modifiers(&node.modifiers)?;
        for (i, exception) in node.exceptions.iter().enumerate() {
            if i > 0 {
                self.write(" | ");
            }
            self.qualified_name(exception);
        }
        self.write(" ");
        self.write(node.id.as_str());
        self.write(") ");
        self.block(&node.body.body)
    }

    pub(crate) fn resource(&mut self, node: &Resource) -> PResult {
        self.modifiers(&node.modifiers)?;
        self.ty(&node.ty)?;
        self.write(" ");
        self.variable_declarator(&node.declarator)
    }
}
