//! Declarations, modules and compilation units.

use crate::{PResult, Printer};
use jast_ast::{
    AnnotationDeclaration, AnnotationMethodDeclaration, ClassDeclaration, CompactConstructorDeclaration,
    ConstructorDeclaration, Decl, Directive, EnumConstant, EnumDeclaration, FieldDeclaration, FormalParameter,
    FormalParameters, ImportDeclaration, Initializer, InterfaceDeclaration, MethodDeclaration,
    ModularCompilationUnit, ModuleDeclaration, OrdinaryCompilationUnit, PackageDeclaration, Parameter,
    QualifiedName, ReceiverParameter, RecordComponent, RecordDeclaration, RequiresDirective, Type,
    VariableArityParameter, VariableDeclarator, VariableDeclaratorId,
};
use std::sync::Arc;

impl Printer {
    pub(crate) fn decl(&mut self, decl: &Decl) -> PResult {
        match decl {
            Decl::Empty(_) => {
                self.write(";");
                Ok(())
            }
            Decl::Field(n) => self.field(n),
            Decl::Method(n) => self.method(n),
            Decl::Constructor(n) => self.constructor(n),
            Decl::CompactConstructor(n) => self.compact_constructor(n),
            Decl::Initializer(n) => self.initializer(n),
            Decl::Class(n) => self.class(n),
            Decl::Interface(n) => self.interface(n),
            Decl::Enum(n) => self.enum_declaration(n),
            Decl::Record(n) => self.record(n),
            Decl::Annotation(n) => self.annotation_declaration(n),
            Decl::AnnotationMethod(n) => self.annotation_method(n),
        }
    }

    /// `{}` when empty, otherwise one member per line.
    pub(crate) fn class_body(&mut self, members: &[Arc<Decl>]) -> PResult {
        if members.is_empty() {
            self.write("{}");
            return Ok(());
        }
        self.write("{");
        self.members(members)?;
        self.write_newline();
        self.write("}");
        Ok(())
    }

    fn members(&mut self, members: &[Arc<Decl>]) -> PResult {
        self.increase_indent();
        for member in members {
            self.write_newline();
            self.decl(member)?;
        }
        self.decrease_indent();
        Ok(())
    }

    /// ` keyword A, B` when `types` is non-empty.
    fn type_clause(&mut self, keyword: &str, types: &[Arc<Type>]) -> PResult {
        if types.is_empty() {
            return Ok(());
        }
        self.write(" ");
        self.write(keyword);
        self.write(" ");
        self.types(types, ", ")
    }

    fn throws(&mut self, throws: &[QualifiedName]) {
        if !throws.is_empty() {
            self.write(" throws ");
            self.qualified_names(throws);
        }
    }

    // ========================================================================
    // Variables and parameters
    // ========================================================================

    pub(crate) fn variable_declarators(&mut self, declarators: &[VariableDeclarator]) -> PResult {
        self.write_list(declarators, ", ", |p, declarator| p.variable_declarator(declarator))
    }

    pub(crate) fn variable_declarator(&mut self, node: &VariableDeclarator) -> PResult {
        self.variable_declarator_id(&node.id)?;
        if let Some(init) = &node.init {
            self.write(" = ");
            self.top_expr(init)?;
        }
        Ok(())
    }

    pub(crate) fn variable_declarator_id(&mut self, node: &VariableDeclaratorId) -> PResult {
        self.write(node.id.as_str());
        for dim in &node.dims {
            self.dim(dim)?;
        }
        Ok(())
    }

    pub(crate) fn formal_parameters(&mut self, node: &FormalParameters) -> PResult {
        self.write("(");
        if let Some(receiver) = &node.receiver {
            self.receiver_parameter(receiver)?;
            if !node.params.is_empty() {
                self.write(", ");
            }
        }
        self.write_list(&node.params, ", ", |p, param| match param {
            FormalParameter::Regular(param) => p.parameter(param),
            FormalParameter::VariableArity(param) => p.variable_arity_parameter(param),
        })?;
        self.write(")");
        Ok(())
    }

    /// `Type Outer.this`.
    pub(crate) fn receiver_parameter(&mut self, node: &ReceiverParameter) -> PResult {
        self.ty(&node.ty)?;
        self.write(" ");
        for id in &node.identifiers {
            self.write(id.as_str());
            self.write(".");
        }
        self.write("this");
        Ok(())
    }

    pub(crate) fn parameter(&mut self, node: &Parameter) -> PResult {
        self.modifiers(&node.modifiers)?;
        self.ty(&node.ty)?;
        self.write(" ");
        self.variable_declarator_id(&node.id)
    }

    pub(crate) fn variable_arity_parameter(&mut self, node: &VariableArityParameter) -> PResult {
        self.modifiers(&node.modifiers)?;
        self.ty(&node.ty)?;
        self.dim_annotations(&node.annotations)?;
        self.write("... ");
        self.write(node.id.as_str());
        Ok(())
    }

    // ========================================================================
    // Members
    // ========================================================================

    pub(crate) fn field(&mut self, node: &FieldDeclaration) -> PResult {
        self.modifiers(&node.modifiers)?;
        self.ty(&node.ty)?;
        self.write(" ");
        self.variable_declarators(&node.declarators)?;
        self.write(";");
        Ok(())
    }

    pub(crate) fn method(&mut self, node: &MethodDeclaration) -> PResult {
        self.modifiers(&node.modifiers)?;
        if let Some(type_params) = &node.type_params {
            self.type_parameters(type_params)?;
            self.write(" ");
        }
        self.annotations_inline(&node.annotations)?;
        self.ty(&node.return_type)?;
        self.write(" ");
        self.write(node.id.as_str());
        self.formal_parameters(&node.params)?;
        for dim in &node.dims {
            self.dim(dim)?;
        }
        self.throws(&node.throws);
        match &node.body {
            Some(body) => {
                self.write(" ");
                self.block(&body.body)
            }
            None => {
                self.write(";");
                Ok(())
            }
        }
    }

    pub(crate) fn constructor(&mut self, node: &ConstructorDeclaration) -> PResult {
        self.modifiers(&node.modifiers)?;
        if let Some(type_params) = &node.type_params {
            self.type_parameters(type_params)?;
            self.write(" ");
        }
        self.write(node.id.as_str());
        self.formal_parameters(&node.params)?;
        self.throws(&node.throws);
        self.write(" ");
        self.block(&node.body.body)
    }

    pub(crate) fn compact_constructor(&mut self, node: &CompactConstructorDeclaration) -> PResult {
        self.modifiers(&node.modifiers)?;
        self.write(node.id.as_str());
        self.write(" ");
        self.block(&node.body.body)
    }

    pub(crate) fn initializer(&mut self, node: &Initializer) -> PResult {
        if node.static_ {
            self.write("static ");
        }
        self.block(&node.body.body)
    }

    // ========================================================================
    // Type declarations
    // ========================================================================

    pub(crate) fn class(&mut self, node: &ClassDeclaration) -> PResult {
        self.modifiers(&node.modifiers)?;
        self.write("class ");
        self.write(node.id.as_str());
        if let Some(type_params) = &node.type_params {
            self.type_parameters(type_params)?;
        }
        if let Some(extends) = &node.extends {
            self.write(" extends ");
            self.ty(extends)?;
        }
        self.type_clause("implements", &node.implements)?;
        self.type_clause("permits", &node.permits)?;
        self.write(" ");
        self.class_body(&node.body)
    }

    pub(crate) fn interface(&mut self, node: &InterfaceDeclaration) -> PResult {
        self.modifiers(&node.modifiers)?;
        self.write("interface ");
        self.write(node.id.as_str());
        if let Some(type_params) = &node.type_params {
            self.type_parameters(type_params)?;
        }
        self.type_clause("extends", &node.extends)?;
        self.type_clause("permits", &node.permits)?;
        self.write(" ");
        self.class_body(&node.body)
    }

    /// Constants one per line, comma separated; a `;` closes the constant
    /// list when members follow.
    pub(crate) fn enum_declaration(&mut self, node: &EnumDeclaration) -> PResult {
        self.modifiers(&node.modifiers)?;
        self.write("enum ");
        self.write(node.id.as_str());
        self.type_clause("implements", &node.implements)?;
        self.write(" ");
        if node.constants.is_empty() && node.body.is_empty() {
            self.write("{}");
            return Ok(());
        }
        self.write("{");
        self.increase_indent();
        if node.constants.is_empty() {
            self.write_newline();
            self.write(";");
        }
        let last = node.constants.len().saturating_sub(1);
        for (i, constant) in node.constants.iter().enumerate() {
            self.write_newline();
            self.enum_constant(constant)?;
            if i < last {
                self.write(",");
            } else if !node.body.is_empty() {
                self.write(";");
            }
        }
        self.decrease_indent();
        self.members(&node.body)?;
        self.write_newline();
        self.write("}");
        Ok(())
    }

    pub(crate) fn enum_constant(&mut self, node: &EnumConstant) -> PResult {
        self.annotations_inline(&node.annotations)?;
        self.write(node.id.as_str());
        if let Some(args) = &node.args {
            self.arguments(args)?;
        }
        if let Some(body) = &node.body {
            self.write(" ");
            self.class_body(body)?;
        }
        Ok(())
    }

    pub(crate) fn record(&mut self, node: &RecordDeclaration) -> PResult {
        self.modifiers(&node.modifiers)?;
        self.write("record ");
        self.write(node.id.as_str());
        if let Some(type_params) = &node.type_params {
            self.type_parameters(type_params)?;
        }
        self.write("(");
        self.write_list(&node.components, ", ", |p, component| p.record_component(component))?;
        self.write(")");
        self.type_clause("implements", &node.implements)?;
        self.write(" ");
        self.class_body(&node.body)
    }

    pub(crate) fn record_component(&mut self, node: &RecordComponent) -> PResult {
        self.annotations_inline(&node.annotations)?;
        self.ty(&node.ty)?;
        if node.variable_arity {
            self.write("...");
        }
        self.write(" ");
        self.write(node.id.as_str());
        Ok(())
    }

    pub(crate) fn annotation_declaration(&mut self, node: &AnnotationDeclaration) -> PResult {
        self.modifiers(&node.modifiers)?;
        self.write("@interface ");
        self.write(node.id.as_str());
        self.write(" ");
        self.class_body(&node.body)
    }

    pub(crate) fn annotation_method(&mut self, node: &AnnotationMethodDeclaration) -> PResult {
        self.modifiers(&node.modifiers)?;
        self.ty(&node.ty)?;
        self.write(" ");
        self.write(node.id.as_str());
        self.write("()");
        if let Some(default) = &node.default {
            self.write(" default ");
            self.element_value(default)?;
        }
        self.write(";");
        Ok(())
    }

    // ========================================================================
    // Packages, imports and modules
    // ========================================================================

    pub(crate) fn package(&mut self, node: &PackageDeclaration) -> PResult {
        self.annotations_inline(&node.annotations)?;
        self.write("package ");
        self.qualified_name(&node.name);
        self.write(";");
        Ok(())
    }

    pub(crate) fn import(&mut self, node: &ImportDeclaration) {
        self.write("import ");
        if node.static_ {
            self.write("static ");
        }
        self.qualified_name(&node.name);
        if node.on_demand {
            self.write(".*");
        }
        self.write(";");
    }

    pub(crate) fn requires(&mut self, node: &RequiresDirective) -> PResult {
        self.write("requires ");
        self.modifiers(&node.modifiers)?;
        self.qualified_name(&node.name);
        self.write(";");
        Ok(())
    }

    /// `keyword name [joiner a, b];`
    pub(crate) fn targets(&mut self, keyword: &str, name: &QualifiedName, joiner: &str, targets: &[QualifiedName]) {
        self.write(keyword);
        self.write(" ");
        self.qualified_name(name);
        if !targets.is_empty() {
            self.write(" ");
            self.write(joiner);
            self.write(" ");
            self.qualified_names(targets);
        }
        self.write(";");
    }

    fn directive(&mut self, directive: &Directive) -> PResult {
        match directive {
            Directive::Requires(n) => return self.requires(n),
            Directive::Exports(n) => self.targets("exports", &n.name, "to", &n.to),
            Directive::Opens(n) => self.targets("opens", &n.name, "to", &n.to),
            Directive::Uses(n) => self.targets("uses", &n.name, "", &[]),
            Directive::Provides(n) => self.targets("provides", &n.name, "with", &n.with),
        }
        Ok(())
    }

    pub(crate) fn module(&mut self, node: &ModuleDeclaration) -> PResult {
        self.annotations_inline(&node.annotations)?;
        if node.open {
            self.write("open ");
        }
        self.write("module ");
        self.qualified_name(&node.name);
        self.write(" ");
        if node.directives.is_empty() {
            self.write("{}");
            return Ok(());
        }
        self.write("{");
        self.increase_indent();
        for directive in &node.directives {
            self.write_newline();
            self.directive(directive)?;
        }
        self.decrease_indent();
        self.write_newline();
        self.write("}");
        Ok(())
    }

    /// The imports one per line, preceded by a blank line when something
    /// came before them.
    fn imports(&mut self, imports: &[ImportDeclaration], started: bool) -> bool {
        if imports.is_empty() {
            return started;
        }
        if started {
            self.write_blank_line();
        }
        for (i, import) in imports.iter().enumerate() {
            if i > 0 {
                self.write_newline();
            }
            self.import(import);
        }
        true
    }

    /// Package, imports and type declarations, separated by blank lines.
    pub(crate) fn ordinary_compilation_unit(&mut self, node: &OrdinaryCompilationUnit) -> PResult {
        let mut started = false;
        if let Some(package) = &node.package {
            self.package(package)?;
            started = true;
        }
        started = self.imports(&node.imports, started);
        for decl in &node.declarations {
            if started {
                self.write_blank_line();
            }
            self.decl(decl)?;
            started = true;
        }
        Ok(())
    }

    pub(crate) fn modular_compilation_unit(&mut self, node: &ModularCompilationUnit) -> PResult {
        if self.imports(&node.imports, false) {
            self.write_blank_line();
        }
        self.module(&node.module)
    }
}
