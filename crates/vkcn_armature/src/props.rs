//! Component prop names.
//!
//! Collected from `defineProps` in `<script setup>` and from the `props`
//! option of an `export default` component in `<script>`. Type-based
//! declarations resolve interfaces and type aliases declared in the same
//! block.

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, ArrayExpressionElement, CallExpression, Declaration, ExportDefaultDeclarationKind,
    Expression, ObjectExpression, ObjectPropertyKind, PropertyKey, Statement, TSSignature, TSType,
    TSTypeName,
};
use oxc_parser::Parser;
use oxc_span::SourceType;
use vkcn_carton::{CompactString, FxHashMap};
use vkcn_relief::{SfcBlock, SfcDescriptor};

/// Collect the prop names declared by a component.
pub fn collect_props(source: &str, descriptor: &SfcDescriptor) -> Vec<CompactString> {
    let mut props = Vec::new();
    for block in [&descriptor.script_setup, &descriptor.script]
        .into_iter()
        .flatten()
    {
        collect_block_props(source, block, &mut props);
    }
    props
}

fn collect_block_props(source: &str, block: &SfcBlock, props: &mut Vec<CompactString>) {
    let allocator = Allocator::default();
    let lang = match block.attr("lang") {
        Some("ts") => "script.ts",
        Some("tsx") => "script.tsx",
        Some("jsx") => "script.jsx",
        _ => "script.js",
    };
    let source_type = SourceType::from_path(lang).unwrap_or_default();
    let text = block.content.text(source);

    let ret = Parser::new(&allocator, text, source_type).parse();
    if ret.panicked {
        tracing::debug!("script block did not parse, props ignored");
        return;
    }

    let mut collector = PropsCollector {
        types: FxHashMap::default(),
        props,
    };

    // Types may be declared after the macro call
    for stmt in ret.program.body.iter() {
        collector.register_type(stmt);
    }
    for stmt in ret.program.body.iter() {
        collector.visit_statement(stmt);
    }
}

/// A type declaration that can back `defineProps<T>()`.
enum TypeDecl<'a, 'b> {
    Members(&'b oxc_allocator::Vec<'a, TSSignature<'a>>),
    Alias(&'b TSType<'a>),
}

struct PropsCollector<'a, 'b, 'p> {
    types: FxHashMap<&'b str, TypeDecl<'a, 'b>>,
    props: &'p mut Vec<CompactString>,
}

impl<'a, 'b> PropsCollector<'a, 'b, '_> {
    fn push(&mut self, name: &str) {
        if !self.props.iter().any(|p| p == name) {
            self.props.push(CompactString::new(name));
        }
    }

    fn register_type(&mut self, stmt: &'b Statement<'a>) {
        match stmt {
            Statement::TSInterfaceDeclaration(iface) => {
                self.types
                    .insert(iface.id.name.as_str(), TypeDecl::Members(&iface.body.body));
            }
            Statement::TSTypeAliasDeclaration(alias) => {
                self.types
                    .insert(alias.id.name.as_str(), TypeDecl::Alias(&alias.type_annotation));
            }
            Statement::ExportNamedDeclaration(export) => match &export.declaration {
                Some(Declaration::TSInterfaceDeclaration(iface)) => {
                    self.types
                        .insert(iface.id.name.as_str(), TypeDecl::Members(&iface.body.body));
                }
                Some(Declaration::TSTypeAliasDeclaration(alias)) => {
                    self.types
                        .insert(alias.id.name.as_str(), TypeDecl::Alias(&alias.type_annotation));
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        match stmt {
            Statement::ExpressionStatement(expr_stmt) => {
                self.visit_macro(&expr_stmt.expression);
            }
            Statement::VariableDeclaration(decl) => {
                for declarator in decl.declarations.iter() {
                    if let Some(init) = &declarator.init {
                        self.visit_macro(init);
                    }
                }
            }
            Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                ExportDefaultDeclarationKind::ObjectExpression(obj) => self.visit_options(obj),
                ExportDefaultDeclarationKind::CallExpression(call) => {
                    if let Some(Argument::ObjectExpression(obj)) = call.arguments.first() {
                        self.visit_options(obj);
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// `defineProps(...)`, `withDefaults(defineProps(...), ...)`
    fn visit_macro(&mut self, expr: &Expression<'a>) {
        let Some(call) = extract_call_expression(expr) else {
            return;
        };
        let Expression::Identifier(callee) = &call.callee else {
            return;
        };
        match callee.name.as_str() {
            "defineProps" => self.visit_define_props(call),
            "withDefaults" => {
                if let Some(Argument::CallExpression(inner)) = call.arguments.first() {
                    if matches!(&inner.callee, Expression::Identifier(id) if id.name.as_str() == "defineProps")
                    {
                        self.visit_define_props(inner);
                    }
                }
            }
            _ => {}
        }
    }

    fn visit_define_props(&mut self, call: &CallExpression<'a>) {
        if let Some(type_args) = &call.type_arguments {
            for ty in type_args.params.iter() {
                self.visit_type(ty, 0);
            }
        } else if let Some(first) = call.arguments.first() {
            match first {
                Argument::ArrayExpression(arr) => {
                    for element in arr.elements.iter() {
                        if let ArrayExpressionElement::StringLiteral(s) = element {
                            self.push(s.value.as_str());
                        }
                    }
                }
                Argument::ObjectExpression(obj) => self.visit_prop_keys(obj),
                _ => {}
            }
        }
    }

    fn visit_type(&mut self, ty: &TSType<'a>, depth: usize) {
        // Guards against alias cycles
        if depth > 8 {
            return;
        }
        match ty {
            TSType::TSTypeLiteral(lit) => self.visit_signatures(&lit.members),
            TSType::TSIntersectionType(intersection) => {
                for ty in intersection.types.iter() {
                    self.visit_type(ty, depth + 1);
                }
            }
            TSType::TSTypeReference(reference) => {
                let TSTypeName::IdentifierReference(id) = &reference.type_name else {
                    return;
                };
                match self.types.get(id.name.as_str()) {
                    Some(TypeDecl::Members(members)) => {
                        let members = *members;
                        self.visit_signatures(members);
                    }
                    Some(TypeDecl::Alias(alias)) => {
                        let alias = *alias;
                        self.visit_type(alias, depth + 1);
                    }
                    None => {}
                }
            }
            _ => {}
        }
    }

    fn visit_signatures(&mut self, members: &oxc_allocator::Vec<'a, TSSignature<'a>>) {
        for member in members.iter() {
            if let TSSignature::TSPropertySignature(prop) = member {
                match &prop.key {
                    PropertyKey::StaticIdentifier(id) => self.push(id.name.as_str()),
                    PropertyKey::StringLiteral(lit) => self.push(lit.value.as_str()),
                    _ => {}
                }
            }
        }
    }

    /// Options API: `{ props: [...] }` or `{ props: {...} }`
    fn visit_options(&mut self, obj: &ObjectExpression<'a>) {
        for prop in obj.properties.iter() {
            let ObjectPropertyKind::ObjectProperty(p) = prop else {
                continue;
            };
            if !matches!(&p.key, PropertyKey::StaticIdentifier(id) if id.name.as_str() == "props") {
                continue;
            }
            match &p.value {
                Expression::ArrayExpression(arr) => {
                    for element in arr.elements.iter() {
                        if let ArrayExpressionElement::StringLiteral(s) = element {
                            self.push(s.value.as_str());
                        }
                    }
                }
                Expression::ObjectExpression(props) => self.visit_prop_keys(props),
                _ => {}
            }
        }
    }

    fn visit_prop_keys(&mut self, obj: &ObjectExpression<'a>) {
        for prop in obj.properties.iter() {
            if let ObjectPropertyKind::ObjectProperty(p) = prop {
                match &p.key {
                    PropertyKey::StaticIdentifier(id) => self.push(id.name.as_str()),
                    PropertyKey::StringLiteral(lit) => self.push(lit.value.as_str()),
                    _ => {}
                }
            }
        }
    }
}

/// Unwrap `as`, `satisfies`, `!` and parentheses around a call.
fn extract_call_expression<'a, 'b>(expr: &'b Expression<'a>) -> Option<&'b CallExpression<'a>> {
    match expr {
        Expression::CallExpression(call) => Some(call),
        Expression::TSAsExpression(ts_as) => extract_call_expression(&ts_as.expression),
        Expression::TSSatisfiesExpression(ts_satisfies) => {
            extract_call_expression(&ts_satisfies.expression)
        }
        Expression::TSNonNullExpression(ts_non_null) => {
            extract_call_expression(&ts_non_null.expression)
        }
        Expression::ParenthesizedExpression(paren) => extract_call_expression(&paren.expression),
        _ => None,
    }
}
