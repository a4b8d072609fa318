//! Names, modifiers, annotations, types and patterns.

use crate::{Context, PResult, Printer};
use jast_ast::{
    Annotation, AnnotationElement, Coit, Dim, ElementValue, ElementValueArrayInitializer, ElementValuePair,
    GuardedPattern, Modifier, Pattern, Precedence, QualifiedName, Type, TypeArguments, TypeBound, TypeKind,
    TypeParameter, TypeParameters, WildcardBound,
};
use jast_diagnostics::UnparseError;
use std::sync::Arc;

impl Printer {
    // ========================================================================
    // Names
    // ========================================================================

    pub(crate) fn qualified_name(&mut self, name: &QualifiedName) {
        for (i, id) in name.identifiers.iter().enumerate() {
            if i > 0 {
                self.write(".");
            }
            self.write(id.as_str());
        }
    }

    pub(crate) fn qualified_names(&mut self, names: &[QualifiedName]) {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.qualified_name(name);
        }
    }

    // ========================================================================
    // Modifiers and annotations
    // ========================================================================

    /// Each modifier followed by a space.
    pub(crate) fn modifiers(&mut self, modifiers: &[Modifier]) -> PResult {
        for modifier in modifiers {
            match modifier {
                Modifier::Keyword(keyword) => self.write(keyword.keyword.as_str()),
                Modifier::Annotation(annotation) => self.annotation(annotation)?,
            }
            self.write(" ");
        }
        Ok(())
    }

    /// Each annotation followed by a space.
    pub(crate) fn annotations_inline(&mut self, annotations: &[Annotation]) -> PResult {
        for annotation in annotations {
            self.annotation(annotation)?;
            self.write(" ");
        }
        Ok(())
    }

    pub(crate) fn annotation(&mut self, node: &Annotation) -> PResult {
        self.write("@");
        self.qualified_name(&node.name);
        if node.elements.is_empty() {
            return Ok(());
        }
        self.write("(");
        self.write_list(&node.elements, ", ", |p, element| match element {
            AnnotationElement::Pair(pair) => p.element_value_pair(pair),
            AnnotationElement::Value(value) => p.element_value(value),
        })?;
        self.write(")");
        Ok(())
    }

    pub(crate) fn element_value_pair(&mut self, node: &ElementValuePair) -> PResult {
        self.write(node.id.as_str());
        self.write(" = ");
        self.element_value(&node.value)
    }

    pub(crate) fn element_value(&mut self, value: &ElementValue) -> PResult {
        match value {
            ElementValue::Expr(expr) => self.top_expr(expr),
            ElementValue::Annotation(annotation) => self.annotation(annotation),
            ElementValue::Array(array) => self.element_value_array(array),
        }
    }

    pub(crate) fn element_value_array(&mut self, node: &ElementValueArrayInitializer) -> PResult {
        self.write("{");
        self.write_list(&node.values, ", ", |p, value| p.element_value(value))?;
        self.write("}");
        Ok(())
    }

    // ========================================================================
    // Types
    // ========================================================================

    pub(crate) fn ty(&mut self, ty: &Type) -> PResult {
        self.annotations_inline(&ty.annotations)?;
        match &ty.kind {
            TypeKind::Class(class) => self.write_list(&class.coits, ".", |p, coit| p.coit(coit)),
            TypeKind::Array(array) => {
                self.ty(&array.elem)?;
                for dim in &array.dims {
                    self.dim(dim)?;
                }
                Ok(())
            }
            TypeKind::Wildcard(wildcard) => {
                self.write("?");
                match &wildcard.bound {
                    Some(bound) => self.wildcard_bound(bound),
                    None => Ok(()),
                }
            }
            _ => {
                self.write(ty.keyword().unwrap_or_default());
                Ok(())
            }
        }
    }

    pub(crate) fn types(&mut self, types: &[Arc<Type>], sep: &str) -> PResult {
        self.write_list(types, sep, |p, ty| p.ty(ty))
    }

    pub(crate) fn coit(&mut self, node: &Coit) -> PResult {
        self.annotations_inline(&node.annotations)?;
        self.write(node.id.as_str());
        if let Some(type_args) = &node.type_args {
            self.type_arguments(type_args)?;
        }
        Ok(())
    }

    pub(crate) fn wildcard_bound(&mut self, node: &WildcardBound) -> PResult {
        match (node.extends, node.super_) {
            (true, false) => self.write(" extends "),
            (false, true) => self.write(" super "),
            _ => {
                return Err(UnparseError::new(
                    "WildcardBound",
                    "exactly one of extends and super must be set",
                ))
            }
        }
        self.ty(&node.ty)
    }

    /// `<A, B>`, or `<>` for a diamond.
    pub(crate) fn type_arguments(&mut self, node: &TypeArguments) -> PResult {
        self.write("<");
        self.types(&node.types, ", ")?;
        self.write(">");
        Ok(())
    }

    pub(crate) fn dim(&mut self, node: &Dim) -> PResult {
        self.dim_annotations(&node.annotations)?;
        self.write("[]");
        Ok(())
    }

    /// ` @A @B ` ahead of a bracket pair, nothing when unannotated.
    pub(crate) fn dim_annotations(&mut self, annotations: &[Annotation]) -> PResult {
        if !annotations.is_empty() {
            self.write(" ");
            self.annotations_inline(annotations)?;
        }
        Ok(())
    }

    pub(crate) fn type_parameters(&mut self, node: &TypeParameters) -> PResult {
        self.write("<");
        self.write_list(&node.parameters, ", ", |p, param| p.type_parameter(param))?;
        self.write(">");
        Ok(())
    }

    pub(crate) fn type_parameter(&mut self, node: &TypeParameter) -> PResult {
        self.annotations_inline(&node.annotations)?;
        self.write(node.id.as_str());
        if let Some(bound) = &node.bound {
            self.write(" extends ");
            self.type_bound(bound)?;
        }
        Ok(())
    }

    pub(crate) fn type_bound(&mut self, node: &TypeBound) -> PResult {
        self.annotations_inline(&node.annotations)?;
        self.types(&node.types, " & ")
    }

    // ========================================================================
    // Patterns
    // ========================================================================

    pub(crate) fn pattern(&mut self, node: &Pattern) -> PResult {
        self.modifiers(&node.modifiers)?;
        self.annotations_inline(&node.annotations)?;
        self.ty(&node.ty)?;
        self.write(" ");
        self.write(node.id.as_str());
        Ok(())
    }

    /// `Type id when a && b`.
    pub(crate) fn guarded_pattern(&mut self, node: &GuardedPattern) -> PResult {
        self.pattern(&node.pattern)?;
        if node.conditions.is_empty() {
            return Ok(());
        }
        self.write(" when ");
        self.write_list(&node.conditions, " && ", |p, condition| {
            p.expr(condition, Context::operand(Precedence::LogicalAnd, false))
        })
    }
}
