//! AST visitor that collects react-intl message declarations.
//!
//! Recognised call sites:
//! - `intl.formatMessage({ id, defaultMessage, description })` and any other
//!   function named in `messageFunctions` (plain or as a member call)
//! - `defineMessages({ key: { id, defaultMessage } })`
//! - `<FormattedMessage id="..." defaultMessage="..." />`

use std::collections::HashSet;

use swc_common::{BytePos, SourceMap};
use swc_ecma_ast::{
    CallExpr, Callee, Expr, JSXAttrName, JSXAttrOrSpread, JSXAttrValue,
    JSXElementName, JSXExpr, JSXOpeningElement, Lit, MemberProp, ObjectLit, Prop, PropName,
    PropOrSpread,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::config::Config;
use crate::core::{MessageDeclaration, SkipReason, SkippedCallSite, SourceContext, SourceLocation};

/// Names of the functions and components that declare messages.
#[derive(Debug, Clone, Default)]
pub struct CallSiteNames {
    pub functions: HashSet<String>,
    pub collections: HashSet<String>,
    pub components: HashSet<String>,
}

impl CallSiteNames {
    pub fn from_config(config: &Config) -> Self {
        Self {
            functions: config.message_functions.iter().cloned().collect(),
            collections: config.message_collections.iter().cloned().collect(),
            components: config.message_components.iter().cloned().collect(),
        }
    }
}

/// Value of one descriptor field as written at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldValue {
    Literal(String),
    Dynamic,
}

#[derive(Debug, Default)]
struct Descriptor {
    id: Option<FieldValue>,
    default_message: Option<FieldValue>,
    description: Option<FieldValue>,
}

impl Descriptor {
    fn set(&mut self, name: &str, value: FieldValue) {
        match name {
            "id" => self.id = Some(value),
            "defaultMessage" => self.default_message = Some(value),
            "description" => self.description = Some(value),
            _ => {}
        }
    }

    fn from_object(obj: &ObjectLit) -> Self {
        let mut descriptor = Self::default();
        for prop in &obj.props {
            let PropOrSpread::Prop(prop) = prop else {
                continue;
            };
            match &**prop {
                Prop::KeyValue(kv) => {
                    if let Some(name) = prop_name(&kv.key) {
                        descriptor.set(name, field_value(&kv.value));
                    }
                }
                Prop::Shorthand(ident) => descriptor.set(ident.sym.as_str(), FieldValue::Dynamic),
                _ => {}
            }
        }
        descriptor
    }

    fn from_jsx(node: &JSXOpeningElement) -> Self {
        let mut descriptor = Self::default();
        for attr in &node.attrs {
            let JSXAttrOrSpread::JSXAttr(attr) = attr else {
                continue;
            };
            if let JSXAttrName::Ident(name) = &attr.name {
                descriptor.set(name.sym.as_str(), jsx_attr_value(attr.value.as_ref()));
            }
        }
        descriptor
    }
}

fn prop_name(key: &PropName) -> Option<&str> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.as_str()),
        PropName::Str(s) => s.value.as_str(),
        _ => None,
    }
}

/// Strip wrappers that do not change a value: parens, `as const`, `satisfies`.
fn unwrap_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(p) => unwrap_expr(&p.expr),
        Expr::TsAs(a) => unwrap_expr(&a.expr),
        Expr::TsConstAssertion(c) => unwrap_expr(&c.expr),
        Expr::TsSatisfies(s) => unwrap_expr(&s.expr),
        _ => expr,
    }
}

/// Statically resolve a string value, if the expression is one.
///
/// Accepts string literals and template literals without substitutions.
/// Concatenations are dynamic.
pub(crate) fn literal_value(expr: &Expr) -> Option<String> {
    match unwrap_expr(expr) {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .iter()
            .map(|q| q.cooked.as_ref().and_then(|c| c.as_str()))
            .collect::<Option<String>>(),
        _ => None,
    }
}

fn field_value(expr: &Expr) -> FieldValue {
    literal_value(expr).map_or(FieldValue::Dynamic, FieldValue::Literal)
}

fn jsx_attr_value(value: Option<&JSXAttrValue>) -> FieldValue {
    match value {
        Some(JSXAttrValue::Str(s)) => s
            .value
            .as_str()
            .map_or(FieldValue::Dynamic, |v| FieldValue::Literal(v.to_string())),
        Some(JSXAttrValue::JSXExprContainer(container)) => match &container.expr {
            JSXExpr::Expr(expr) => field_value(expr),
            JSXExpr::JSXEmptyExpr(_) => FieldValue::Dynamic,
        },
        _ => FieldValue::Dynamic,
    }
}

fn callee_name(callee: &Callee) -> Option<&str> {
    let Callee::Expr(expr) = callee else {
        return None;
    };
    match &**expr {
        Expr::Ident(ident) => Some(ident.sym.as_str()),
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(prop) => Some(prop.sym.as_str()),
            _ => None,
        },
        _ => None,
    }
}

fn element_name(name: &JSXElementName) -> Option<&str> {
    match name {
        JSXElementName::Ident(ident) => Some(ident.sym.as_str()),
        JSXElementName::JSXMemberExpr(member) => Some(member.prop.sym.as_str()),
        JSXElementName::JSXNamespacedName(_) => None,
    }
}

/// First argument of a call as an object literal, if it is one.
fn first_object_arg(node: &CallExpr) -> Option<&ObjectLit> {
    let arg = node.args.first()?;
    if arg.spread.is_some() {
        return None;
    }
    match unwrap_expr(&arg.expr) {
        Expr::Object(obj) => Some(obj),
        _ => None,
    }
}

pub struct DeclarationVisitor<'a> {
    file_path: &'a str,
    source_map: &'a SourceMap,
    names: &'a CallSiteNames,

    pub declarations: Vec<MessageDeclaration>,
    pub skipped: Vec<SkippedCallSite>,
}

impl<'a> DeclarationVisitor<'a> {
    pub fn new(file_path: &'a str, source_map: &'a SourceMap, names: &'a CallSiteNames) -> Self {
        Self {
            file_path,
            source_map,
            names,
            declarations: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn make_context(&self, pos: BytePos) -> SourceContext {
        let loc = self.source_map.lookup_char_pos(pos);
        let source_line = loc
            .file
            .get_line(loc.line - 1)
            .map(|cow| cow.to_string())
            .unwrap_or_default();
        SourceContext::new(
            SourceLocation::new(self.file_path, loc.line, loc.col_display + 1),
            source_line,
        )
    }

    fn skip(&mut self, pos: BytePos, reason: SkipReason, id: Option<String>) {
        let context = self.make_context(pos);
        self.skipped.push(SkippedCallSite {
            context,
            reason,
            id,
        });
    }

    fn record(&mut self, pos: BytePos, descriptor: Descriptor) {
        let id = match descriptor.id {
            Some(FieldValue::Literal(id)) => id,
            Some(FieldValue::Dynamic) => {
                self.skip(pos, SkipReason::DynamicId, None);
                return;
            }
            None => {
                // `formatMessage(messages.title)`-style references carry no id
                // of their own; only complain when a message text was given.
                if descriptor.default_message.is_some() {
                    self.skip(pos, SkipReason::MissingId, None);
                }
                return;
            }
        };

        let default_message = match descriptor.default_message {
            Some(FieldValue::Literal(message)) => message,
            Some(FieldValue::Dynamic) => {
                self.skip(pos, SkipReason::DynamicDefaultMessage, Some(id));
                return;
            }
            None => {
                self.skip(pos, SkipReason::MissingDefaultMessage, Some(id));
                return;
            }
        };

        let description = match descriptor.description {
            Some(FieldValue::Literal(d)) => Some(d),
            _ => None,
        };

        let context = self.make_context(pos);
        self.declarations.push(MessageDeclaration {
            id,
            default_message,
            description,
            context,
        });
    }

    /// `defineMessages({ title: { id, defaultMessage }, ... })`
    fn record_collection(&mut self, obj: &ObjectLit) {
        for prop in &obj.props {
            if let PropOrSpread::Prop(prop) = prop
                && let Prop::KeyValue(kv) = &**prop
                && let Expr::Object(inner) = unwrap_expr(&kv.value)
            {
                self.record(inner.span.lo, Descriptor::from_object(inner));
            }
        }
    }
}

impl Visit for DeclarationVisitor<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Some(name) = callee_name(&node.callee)
            && let Some(obj) = first_object_arg(node)
        {
            if self.names.functions.contains(name) {
                self.record(node.span.lo, Descriptor::from_object(obj));
            } else if self.names.collections.contains(name) {
                self.record_collection(obj);
            }
        }

        node.visit_children_with(self);
    }

    fn visit_jsx_opening_element(&mut self, node: &JSXOpeningElement) {
        if let Some(name) = element_name(&node.name)
            && self.names.components.contains(name)
        {
            self.record(node.span.lo, Descriptor::from_jsx(node));
        }

        node.visit_children_with(self);
    }
}
