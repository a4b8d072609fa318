//! The table of concrete node kinds.
//!
//! `node_kinds!(mac)` calls `mac!` with one
//! `Variant(Type) => visit_hook, transform_hook;` entry per concrete node
//! struct. The borrowed [`NodeRef`](crate::NodeRef) view, the
//! [`Visitor`](crate::Visitor) hooks and the
//! [`Transformer`](crate::Transformer) hooks are all generated from it, so
//! adding a node kind here adds it everywhere.

macro_rules! node_kinds {
    ($mac:ident) => {
        $mac! {
            // Names and literals
            Identifier(Identifier) => visit_identifier, transform_identifier;
            QualifiedName(QualifiedName) => visit_qualified_name, transform_qualified_name;
            Literal(Literal) => visit_literal, transform_literal;

            // Modifiers and annotations
            KeywordModifier(KeywordModifier) => visit_keyword_modifier, transform_keyword_modifier;
            Annotation(Annotation) => visit_annotation, transform_annotation;
            ElementValuePair(ElementValuePair) => visit_element_value_pair, transform_element_value_pair;
            ElementValueArrayInitializer(ElementValueArrayInitializer) => visit_element_value_array_initializer, transform_element_value_array_initializer;

            // Types
            Type(Type) => visit_type, transform_type;
            Coit(Coit) => visit_coit, transform_coit;
            WildcardBound(WildcardBound) => visit_wildcard_bound, transform_wildcard_bound;
            TypeArguments(TypeArguments) => visit_type_arguments, transform_type_arguments;
            Dim(Dim) => visit_dim, transform_dim;
            TypeParameter(TypeParameter) => visit_type_parameter, transform_type_parameter;
            TypeBound(TypeBound) => visit_type_bound, transform_type_bound;
            TypeParameters(TypeParameters) => visit_type_parameters, transform_type_parameters;
            Pattern(Pattern) => visit_pattern, transform_pattern;
            GuardedPattern(GuardedPattern) => visit_guarded_pattern, transform_guarded_pattern;

            // Operators
            BinaryOperator(BinaryOperator) => visit_binary_operator, transform_binary_operator;
            UnaryOperator(UnaryOperator) => visit_unary_operator, transform_unary_operator;
            PostOperator(PostOperator) => visit_post_operator, transform_post_operator;
            AssignOperator(AssignOperator) => visit_assign_operator, transform_assign_operator;

            // Expressions
            Name(Name) => visit_name, transform_name;
            Constant(Constant) => visit_constant, transform_constant;
            This(This) => visit_this, transform_this;
            Super(Super) => visit_super, transform_super;
            ClassExpr(ClassExpr) => visit_class_expr, transform_class_expr;
            Lambda(Lambda) => visit_lambda, transform_lambda;
            Assignment(Assignment) => visit_assignment, transform_assignment;
            IfExp(IfExp) => visit_if_exp, transform_if_exp;
            BinOp(BinOp) => visit_bin_op, transform_bin_op;
            InstanceOf(InstanceOf) => visit_instance_of, transform_instance_of;
            UnaryOp(UnaryOp) => visit_unary_op, transform_unary_op;
            PostOp(PostOp) => visit_post_op, transform_post_op;
            Cast(Cast) => visit_cast, transform_cast;
            NewObject(NewObject) => visit_new_object, transform_new_object;
            NewInnerObject(NewInnerObject) => visit_new_inner_object, transform_new_inner_object;
            NewArray(NewArray) => visit_new_array, transform_new_array;
            DimExpr(DimExpr) => visit_dim_expr, transform_dim_expr;
            ArrayInitializer(ArrayInitializer) => visit_array_initializer, transform_array_initializer;
            SwitchExp(SwitchExp) => visit_switch_exp, transform_switch_exp;
            SwitchExprRule(SwitchExprRule) => visit_switch_expr_rule, transform_switch_expr_rule;
            Call(Call) => visit_call, transform_call;
            Member(Member) => visit_member, transform_member;
            ArrayAccess(ArrayAccess) => visit_array_access, transform_array_access;
            Reference(Reference) => visit_reference, transform_reference;
            ExplicitGenericInvocation(ExplicitGenericInvocation) => visit_explicit_generic_invocation, transform_explicit_generic_invocation;

            // Statements
            Empty(Empty) => visit_empty, transform_empty;
            Block(Block) => visit_block, transform_block;
            LocalTypeDeclaration(LocalTypeDeclaration) => visit_local_type_declaration, transform_local_type_declaration;
            LocalVariableDeclaration(LocalVariableDeclaration) => visit_local_variable_declaration, transform_local_variable_declaration;
            Labeled(Labeled) => visit_labeled, transform_labeled;
            ExpressionStmt(ExpressionStmt) => visit_expression_stmt, transform_expression_stmt;
            If(If) => visit_if, transform_if;
            Assert(Assert) => visit_assert, transform_assert;
            Match(Match) => visit_match, transform_match;
            Case(Case) => visit_case, transform_case;
            DefaultCase(DefaultCase) => visit_default_case, transform_default_case;
            SwitchGroup(SwitchGroup) => visit_switch_group, transform_switch_group;
            SwitchBlock(SwitchBlock) => visit_switch_block, transform_switch_block;
            Switch(Switch) => visit_switch, transform_switch;
            While(While) => visit_while, transform_while;
            DoWhile(DoWhile) => visit_do_while, transform_do_while;
            For(For) => visit_for, transform_for;
            ForEach(ForEach) => visit_for_each, transform_for_each;
            Break(Break) => visit_break, transform_break;
            Continue(Continue) => visit_continue, transform_continue;
            Return(Return) => visit_return, transform_return;
            Throw(Throw) => visit_throw, transform_throw;
            Synchronized(Synchronized) => visit_synchronized, transform_synchronized;
            Yield(Yield) => visit_yield, transform_yield;
            CatchClause(CatchClause) => visit_catch_clause, transform_catch_clause;
            Resource(Resource) => visit_resource, transform_resource;
            Try(Try) => visit_try, transform_try;
            TryWithResources(TryWithResources) => visit_try_with_resources, transform_try_with_resources;

            // Declarations
            VariableDeclaratorId(VariableDeclaratorId) => visit_variable_declarator_id, transform_variable_declarator_id;
            VariableDeclarator(VariableDeclarator) => visit_variable_declarator, transform_variable_declarator;
            ReceiverParameter(ReceiverParameter) => visit_receiver_parameter, transform_receiver_parameter;
            Parameter(Parameter) => visit_parameter, transform_parameter;
            VariableArityParameter(VariableArityParameter) => visit_variable_arity_parameter, transform_variable_arity_parameter;
            FormalParameters(FormalParameters) => visit_formal_parameters, transform_formal_parameters;
            EmptyDeclaration(EmptyDeclaration) => visit_empty_declaration, transform_empty_declaration;
            FieldDeclaration(FieldDeclaration) => visit_field_declaration, transform_field_declaration;
            MethodDeclaration(MethodDeclaration) => visit_method_declaration, transform_method_declaration;
            ConstructorDeclaration(ConstructorDeclaration) => visit_constructor_declaration, transform_constructor_declaration;
            CompactConstructorDeclaration(CompactConstructorDeclaration) => visit_compact_constructor_declaration, transform_compact_constructor_declaration;
            Initializer(Initializer) => visit_initializer, transform_initializer;
            ClassDeclaration(ClassDeclaration) => visit_class_declaration, transform_class_declaration;
            InterfaceDeclaration(InterfaceDeclaration) => visit_interface_declaration, transform_interface_declaration;
            EnumConstant(EnumConstant) => visit_enum_constant, transform_enum_constant;
            EnumDeclaration(EnumDeclaration) => visit_enum_declaration, transform_enum_declaration;
            RecordComponent(RecordComponent) => visit_record_component, transform_record_component;
            RecordDeclaration(RecordDeclaration) => visit_record_declaration, transform_record_declaration;
            AnnotationDeclaration(AnnotationDeclaration) => visit_annotation_declaration, transform_annotation_declaration;
            AnnotationMethodDeclaration(AnnotationMethodDeclaration) => visit_annotation_method_declaration, transform_annotation_method_declaration;

            // Compilation units and modules
            PackageDeclaration(PackageDeclaration) => visit_package_declaration, transform_package_declaration;
            ImportDeclaration(ImportDeclaration) => visit_import_declaration, transform_import_declaration;
            RequiresDirective(RequiresDirective) => visit_requires_directive, transform_requires_directive;
            ExportsDirective(ExportsDirective) => visit_exports_directive, transform_exports_directive;
            OpensDirective(OpensDirective) => visit_opens_directive, transform_opens_directive;
            UsesDirective(UsesDirective) => visit_uses_directive, transform_uses_directive;
            ProvidesDirective(ProvidesDirective) => visit_provides_directive, transform_provides_directive;
            ModuleDeclaration(ModuleDeclaration) => visit_module_declaration, transform_module_declaration;
            OrdinaryCompilationUnit(OrdinaryCompilationUnit) => visit_ordinary_compilation_unit, transform_ordinary_compilation_unit;
            ModularCompilationUnit(ModularCompilationUnit) => visit_modular_compilation_unit, transform_modular_compilation_unit;
        }
    };
}
pub(crate) use node_kinds;
