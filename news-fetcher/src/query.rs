//! Path expressions over XML trees.
//!
//! Supports the location-path part of XPath 1.0 that feed rules need:
//! absolute and relative paths, `//`, `.`, `..`, every axis except
//! `namespace`, name tests (with namespace prefixes), `*`, `text()`,
//! `node()` and `@attr`. Predicates are boolean expressions built from
//! positions (`[3]`, `[last()]`), relative paths (`[title]`, `[../@rel]`),
//! comparisons against string literals (`=`, `!=`), `contains()`,
//! `starts-with()`, `not()`, `and`, `or` and parentheses.
//!
//! Unprefixed names match on the local name in any namespace, so
//! `/feed/entry/id` works on an Atom document with a default namespace.

use roxmltree::{Document, Node, NodeType};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {offset}")]
pub struct QueryError {
    pub offset: usize,
    pub message: String,
}

/// A compiled path expression.
#[derive(Debug, Clone)]
pub struct Query {
    source: String,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
    DescendantOrSelf,
    SelfNode,
    Parent,
    Ancestor,
    AncestorOrSelf,
    FollowingSibling,
    PrecedingSibling,
    Following,
    Preceding,
    Attribute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameTest {
    Any,
    Local(String),
    Qualified { prefix: String, local: String },
    AnyInNamespace(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeTest {
    Name(NameTest),
    Text,
    Node,
}

/// A predicate expression. Paths are evaluated relative to the item being
/// filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    Or(Vec<Predicate>),
    And(Vec<Predicate>),
    Not(Box<Predicate>),
    Position(usize),
    Last,
    Exists(Vec<Step>),
    Compare {
        path: Vec<Step>,
        literal: String,
        negated: bool,
    },
    Contains {
        path: Vec<Step>,
        literal: String,
    },
    StartsWith {
        path: Vec<Step>,
        literal: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NodeTest,
    predicates: Vec<Predicate>,
}

impl Step {
    fn abbreviated(axis: Axis) -> Self {
        Self {
            axis,
            test: NodeTest::Node,
            predicates: Vec::new(),
        }
    }

    fn descendant_or_self() -> Self {
        Self::abbreviated(Axis::DescendantOrSelf)
    }
}

impl Query {
    pub fn compile(source: &str) -> Result<Self, QueryError> {
        let steps = Parser::new(source).parse_path()?;
        Ok(Self {
            source: source.to_string(),
            steps,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// String values of every selected node, in document order.
    pub fn evaluate(&self, doc: &Document<'_>) -> Vec<String> {
        walk(&self.steps, Selected::Node(doc.root()))
            .iter()
            .map(Selected::string_value)
            .collect()
    }
}

/// Applies `steps` one after another starting from `start`. Every
/// intermediate node set is in document order without duplicates.
fn walk<'a, 'input>(steps: &[Step], start: Selected<'a, 'input>) -> Vec<Selected<'a, 'input>> {
    let mut context = vec![start];

    for step in steps {
        let mut next: Vec<_> = context.iter().flat_map(|item| step.apply(item)).collect();
        next.sort_by_key(Selected::order_key);
        next.dedup_by_key(|item| item.order_key());
        context = next;
    }

    context
}

#[derive(Debug, Clone)]
enum Selected<'a, 'input> {
    Node(Node<'a, 'input>),
    Attribute {
        owner: Node<'a, 'input>,
        index: usize,
        value: String,
    },
}

impl Selected<'_, '_> {
    // An attribute sorts right after its element and before the element's children.
    fn order_key(&self) -> (u32, usize) {
        match self {
            Selected::Node(node) => (node.id().get(), 0),
            Selected::Attribute { owner, index, .. } => (owner.id().get(), index + 1),
        }
    }

    fn string_value(&self) -> String {
        match self {
            Selected::Node(node) => node_string_value(*node),
            Selected::Attribute { value, .. } => value.clone(),
        }
    }
}

fn node_string_value(node: Node<'_, '_>) -> String {
    match node.node_type() {
        NodeType::Root | NodeType::Element => node
            .descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect(),
        NodeType::PI => node.pi().and_then(|pi| pi.value).unwrap_or_default().to_string(),
        NodeType::Text | NodeType::Comment => node.text().unwrap_or_default().to_string(),
    }
}

// Document order.
fn following<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.ancestors()
        .flat_map(|ancestor| ancestor.next_siblings().skip(1))
        .flat_map(|sibling| sibling.descendants())
}

// Reverse document order, nearest node first.
fn preceding<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.ancestors()
        .flat_map(|ancestor| ancestor.prev_siblings().skip(1))
        .flat_map(|sibling| sibling.descendants().collect::<Vec<_>>().into_iter().rev())
}

impl Step {
    /// Candidates come out in axis order (reverse axes nearest first), which
    /// is the order positional predicates count in.
    fn apply<'a, 'input>(&self, item: &Selected<'a, 'input>) -> Vec<Selected<'a, 'input>> {
        let candidates = match *item {
            Selected::Node(node) => self.from_node(node),
            Selected::Attribute { owner, .. } => self.from_attribute(item, owner),
        };
        self.filter(candidates)
    }

    fn from_node<'a, 'input>(&self, node: Node<'a, 'input>) -> Vec<Selected<'a, 'input>> {
        match self.axis {
            Axis::Attribute => self.attributes(node),
            Axis::Child => self.nodes(node.children()),
            Axis::Descendant => self.nodes(node.descendants().skip(1)),
            Axis::DescendantOrSelf => self.nodes(node.descendants()),
            Axis::SelfNode => self.nodes(std::iter::once(node)),
            Axis::Parent => self.nodes(node.parent().into_iter()),
            Axis::Ancestor => self.nodes(node.ancestors().skip(1)),
            Axis::AncestorOrSelf => self.nodes(node.ancestors()),
            Axis::FollowingSibling => self.nodes(node.next_siblings().skip(1)),
            Axis::PrecedingSibling => self.nodes(node.prev_siblings().skip(1)),
            Axis::Following => self.nodes(following(node)),
            Axis::Preceding => self.nodes(preceding(node)),
        }
    }

    // Attributes have an owner but no siblings or children.
    fn from_attribute<'a, 'input>(
        &self,
        attribute: &Selected<'a, 'input>,
        owner: Node<'a, 'input>,
    ) -> Vec<Selected<'a, 'input>> {
        let mut selected = Vec::new();
        if matches!(self.axis, Axis::SelfNode | Axis::AncestorOrSelf) && self.test == NodeTest::Node {
            selected.push(attribute.clone());
        }
        match self.axis {
            Axis::Parent => selected.extend(self.nodes(std::iter::once(owner))),
            Axis::Ancestor | Axis::AncestorOrSelf => selected.extend(self.nodes(owner.ancestors())),
            Axis::Following => {
                selected.extend(self.nodes(owner.descendants().skip(1).chain(following(owner))))
            }
            Axis::Preceding => selected.extend(self.nodes(preceding(owner))),
            _ => {}
        }
        selected
    }

    fn attributes<'a, 'input>(&self, node: Node<'a, 'input>) -> Vec<Selected<'a, 'input>> {
        let NodeTest::Name(test) = &self.test else {
            return Vec::new();
        };
        node.attributes()
            .enumerate()
            .filter(|(_, attr)| name_matches(test, attr.name(), attr.namespace(), node))
            .map(|(index, attr)| Selected::Attribute {
                owner: node,
                index,
                value: attr.value().to_string(),
            })
            .collect()
    }

    fn nodes<'a, 'input>(
        &self,
        nodes: impl Iterator<Item = Node<'a, 'input>>,
    ) -> Vec<Selected<'a, 'input>> {
        nodes
            .filter(|n| node_test_matches(&self.test, *n))
            .map(Selected::Node)
            .collect()
    }

    fn filter<'a, 'input>(&self, mut selected: Vec<Selected<'a, 'input>>) -> Vec<Selected<'a, 'input>> {
        for predicate in &self.predicates {
            let len = selected.len();
            selected = selected
                .into_iter()
                .enumerate()
                .filter(|(i, item)| predicate.holds(item, i + 1, len))
                .map(|(_, item)| item)
                .collect();
        }
        selected
    }
}

fn node_test_matches(test: &NodeTest, node: Node<'_, '_>) -> bool {
    match test {
        NodeTest::Node => true,
        NodeTest::Text => node.is_text(),
        NodeTest::Name(name) => {
            node.is_element() && {
                let tag = node.tag_name();
                name_matches(name, tag.name(), tag.namespace(), node)
            }
        }
    }
}

fn name_matches(test: &NameTest, local: &str, namespace: Option<&str>, scope: Node<'_, '_>) -> bool {
    match test {
        NameTest::Any => true,
        NameTest::Local(name) => name == local,
        NameTest::Qualified { prefix, local: name } => {
            name == local && namespace.is_some() && scope.lookup_namespace_uri(Some(prefix.as_str())) == namespace
        }
        NameTest::AnyInNamespace(prefix) => {
            namespace.is_some() && scope.lookup_namespace_uri(Some(prefix.as_str())) == namespace
        }
    }
}

impl Predicate {
    fn holds(&self, item: &Selected<'_, '_>, position: usize, len: usize) -> bool {
        match self {
            Predicate::Or(terms) => terms.iter().any(|t| t.holds(item, position, len)),
            Predicate::And(terms) => terms.iter().all(|t| t.holds(item, position, len)),
            Predicate::Not(inner) => !inner.holds(item, position, len),
            Predicate::Position(n) => position == *n,
            Predicate::Last => position == len,
            Predicate::Exists(path) => !walk(path, item.clone()).is_empty(),
            // true if any selected node satisfies the comparison
            Predicate::Compare {
                path,
                literal,
                negated,
            } => walk(path, item.clone())
                .iter()
                .any(|selected| (selected.string_value() == *literal) != *negated),
            Predicate::Contains { path, literal } => first_value(path, item).contains(literal.as_str()),
            Predicate::StartsWith { path, literal } => {
                first_value(path, item).starts_with(literal.as_str())
            }
        }
    }
}

// String functions look at the first selected node only; nothing selected
// reads as "".
fn first_value(path: &[Step], item: &Selected<'_, '_>) -> String {
    walk(path, item.clone())
        .first()
        .map(Selected::string_value)
        .unwrap_or_default()
}

struct Parser<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> Parser<'s> {
    fn new(src: &'s str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), QueryError> {
        self.skip_ws();
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{token}'")))
        }
    }

    /// Consumes `keyword` only when it is a whole name.
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let before = self.pos;
        self.skip_ws();
        if self.parse_ncname() == Some(keyword) {
            return true;
        }
        self.pos = before;
        false
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn error(&self, message: impl Into<String>) -> QueryError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> QueryError {
        QueryError {
            offset,
            message: message.into(),
        }
    }

    fn parse_path(mut self) -> Result<Vec<Step>, QueryError> {
        let mut steps = Vec::new();

        self.skip_ws();
        if self.at_end() {
            return Err(self.error("empty expression"));
        }

        if self.eat("//") {
            steps.push(Step::descendant_or_self());
        } else if self.eat("/") {
            self.skip_ws();
            if self.at_end() {
                return Ok(steps);
            }
        }

        steps.extend(self.parse_relative_path()?);

        self.skip_ws();
        if !self.at_end() {
            let c = self.peek().unwrap_or_default();
            return Err(self.error(format!("unexpected character '{c}'")));
        }
        Ok(steps)
    }

    /// `step (('/' | '//') step)*`, stopping at the first token that does
    /// not continue the path.
    fn parse_relative_path(&mut self) -> Result<Vec<Step>, QueryError> {
        let mut steps = Vec::new();
        loop {
            let step = self.parse_step()?;
            let is_attribute = step.axis == Axis::Attribute;
            steps.push(step);

            let before = self.pos;
            self.skip_ws();
            let separator = self.pos;
            let descend = if self.eat("//") {
                true
            } else if self.eat("/") {
                false
            } else {
                self.pos = before;
                return Ok(steps);
            };
            if is_attribute {
                return Err(self.error_at(separator, "an attribute step must be the last step"));
            }
            if descend {
                steps.push(Step::descendant_or_self());
            }
        }
    }

    fn parse_step(&mut self) -> Result<Step, QueryError> {
        self.skip_ws();

        if self.eat("..") {
            return Ok(Step::abbreviated(Axis::Parent));
        }
        if self.eat(".") {
            return Ok(Step::abbreviated(Axis::SelfNode));
        }

        let axis = if self.eat("@") {
            Axis::Attribute
        } else {
            self.parse_axis_specifier()?.unwrap_or(Axis::Child)
        };
        let test = self.parse_node_test(axis)?;
        let predicates = self.parse_predicates()?;

        Ok(Step {
            axis,
            test,
            predicates,
        })
    }

    fn parse_axis_specifier(&mut self) -> Result<Option<Axis>, QueryError> {
        let start = self.pos;
        let Some(name) = self.parse_ncname() else {
            return Ok(None);
        };
        if !self.eat("::") {
            self.pos = start;
            return Ok(None);
        }
        let axis = match name {
            "child" => Axis::Child,
            "descendant" => Axis::Descendant,
            "descendant-or-self" => Axis::DescendantOrSelf,
            "self" => Axis::SelfNode,
            "parent" => Axis::Parent,
            "ancestor" => Axis::Ancestor,
            "ancestor-or-self" => Axis::AncestorOrSelf,
            "following-sibling" => Axis::FollowingSibling,
            "preceding-sibling" => Axis::PrecedingSibling,
            "following" => Axis::Following,
            "preceding" => Axis::Preceding,
            "attribute" => Axis::Attribute,
            other => return Err(self.error_at(start, format!("unsupported axis '{other}'"))),
        };
        Ok(Some(axis))
    }

    fn parse_node_test(&mut self, axis: Axis) -> Result<NodeTest, QueryError> {
        self.skip_ws();
        let start = self.pos;
        let local = match self.parse_name_test()? {
            NameTest::Local(local) => local,
            other => return Ok(NodeTest::Name(other)),
        };

        let before_paren = self.pos;
        self.skip_ws();
        if !self.eat("(") {
            self.pos = before_paren;
            return Ok(NodeTest::Name(NameTest::Local(local)));
        }
        self.expect(")")?;

        match (local.as_str(), axis) {
            ("text", Axis::Attribute) | ("node", Axis::Attribute) => Err(self.error_at(
                start,
                "node type tests are not allowed on the attribute axis",
            )),
            ("text", _) => Ok(NodeTest::Text),
            ("node", _) => Ok(NodeTest::Node),
            (other, _) => Err(self.error_at(start, format!("unsupported function '{other}()'"))),
        }
    }

    fn parse_name_test(&mut self) -> Result<NameTest, QueryError> {
        if self.eat("*") {
            return Ok(NameTest::Any);
        }
        let Some(name) = self.parse_ncname() else {
            return Err(self.error("expected a name test"));
        };
        if self.rest().starts_with(':') && !self.rest().starts_with("::") {
            self.pos += 1;
            if self.eat("*") {
                return Ok(NameTest::AnyInNamespace(name.to_string()));
            }
            let Some(local) = self.parse_ncname() else {
                return Err(self.error("expected a local name after ':'"));
            };
            return Ok(NameTest::Qualified {
                prefix: name.to_string(),
                local: local.to_string(),
            });
        }
        Ok(NameTest::Local(name.to_string()))
    }

    fn parse_ncname(&mut self) -> Option<&'s str> {
        let rest = self.rest();
        let mut chars = rest.char_indices();
        match chars.next() {
            Some((_, c)) if c.is_alphabetic() || c == '_' => {}
            _ => return None,
        }
        let end = chars
            .find(|(_, c)| !(c.is_alphanumeric() || matches!(c, '_' | '-' | '.')))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        self.pos += end;
        Some(&rest[..end])
    }

    fn parse_predicates(&mut self) -> Result<Vec<Predicate>, QueryError> {
        let mut predicates = Vec::new();
        loop {
            let before = self.pos;
            self.skip_ws();
            if !self.eat("[") {
                self.pos = before;
                return Ok(predicates);
            }
            self.skip_ws();
            predicates.push(self.parse_or()?);
            self.expect("]")?;
        }
    }

    fn parse_or(&mut self) -> Result<Predicate, QueryError> {
        let mut terms = vec![self.parse_and()?];
        while self.eat_keyword("or") {
            terms.push(self.parse_and()?);
        }
        Ok(if terms.len() == 1 {
            terms.swap_remove(0)
        } else {
            Predicate::Or(terms)
        })
    }

    fn parse_and(&mut self) -> Result<Predicate, QueryError> {
        let mut terms = vec![self.parse_unary()?];
        while self.eat_keyword("and") {
            terms.push(self.parse_unary()?);
        }
        Ok(if terms.len() == 1 {
            terms.swap_remove(0)
        } else {
            Predicate::And(terms)
        })
    }

    fn parse_unary(&mut self) -> Result<Predicate, QueryError> {
        self.skip_ws();
        let start = self.pos;

        if self.eat("(") {
            let inner = self.parse_or()?;
            self.expect(")")?;
            return Ok(inner);
        }

        if self.peek().is_some_and(|c| c.is_ascii_digit()) {
            let digits = self.rest().chars().take_while(char::is_ascii_digit).count();
            let text = &self.rest()[..digits];
            self.pos += digits;
            let position: usize = text
                .parse()
                .map_err(|_| self.error_at(start, "position is out of range"))?;
            if position == 0 {
                return Err(self.error_at(start, "positions start at 1"));
            }
            return Ok(Predicate::Position(position));
        }

        if let Some(name) = self.parse_ncname() {
            self.skip_ws();
            if self.eat("(") {
                match name {
                    "not" => {
                        let inner = self.parse_or()?;
                        self.expect(")")?;
                        return Ok(Predicate::Not(Box::new(inner)));
                    }
                    "last" => {
                        self.expect(")")?;
                        return Ok(Predicate::Last);
                    }
                    "contains" | "starts-with" => {
                        self.skip_ws();
                        let path = self.parse_relative_path()?;
                        self.expect(",")?;
                        self.skip_ws();
                        let literal = self.parse_literal()?;
                        self.expect(")")?;
                        return Ok(if name == "contains" {
                            Predicate::Contains { path, literal }
                        } else {
                            Predicate::StartsWith { path, literal }
                        });
                    }
                    // node type tests start a path
                    "text" | "node" => {}
                    other => {
                        return Err(self.error_at(start, format!("unsupported function '{other}()'")))
                    }
                }
            }
        }
        self.pos = start;

        let path = self.parse_relative_path()?;
        self.skip_ws();
        let negated = if self.eat("!=") {
            true
        } else if self.eat("=") {
            false
        } else {
            return Ok(Predicate::Exists(path));
        };
        self.skip_ws();
        let literal = self.parse_literal()?;

        Ok(Predicate::Compare {
            path,
            literal,
            negated,
        })
    }

    fn parse_literal(&mut self) -> Result<String, QueryError> {
        let start = self.pos;
        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.error("expected a quoted string")),
        };
        self.pos += 1;
        let Some(len) = self.rest().find(quote) else {
            return Err(self.error_at(start, "unterminated string literal"));
        };
        let literal = self.rest()[..len].to_string();
        self.pos += len + 1;
        Ok(literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(xml: &str, expr: &str) -> Vec<String> {
        let doc = Document::parse(xml).unwrap();
        Query::compile(expr).unwrap().evaluate(&doc)
    }

    const CHANNEL: &str = r#"<rss xmlns:dc="http://purl.org/dc/elements/1.1/"><channel>
<title>Top</title>
<item><title>A</title><guid isPermaLink="false">1</guid><dc:creator>ann</dc:creator></item>
<item><title>B</title><guid>2</guid></item>
<item><title>C <b>bold</b></title><guid isPermaLink="true">3</guid><dc:creator>bob</dc:creator></item>
</channel></rss>"#;

    #[test]
    fn child_paths_select_in_document_order() {
        assert_eq!(values(CHANNEL, "/rss/channel/item/guid"), ["1", "2", "3"]);
        assert_eq!(values(CHANNEL, "rss/channel/item/guid"), ["1", "2", "3"]);
    }

    #[test]
    fn descendant_axis_does_not_duplicate() {
        assert_eq!(values(CHANNEL, "//title"), ["Top", "A", "B", "C bold"]);
        assert_eq!(values(CHANNEL, "//channel//item/title"), ["A", "B", "C bold"]);
    }

    #[test]
    fn predicates_filter_per_parent() {
        assert_eq!(values(CHANNEL, "/rss/channel/item[2]/title"), ["B"]);
        assert_eq!(values(CHANNEL, "/rss/channel/item[last()]/guid"), ["3"]);
        assert_eq!(values(CHANNEL, "//item[dc:creator]/title"), ["A", "C bold"]);
        assert_eq!(values(CHANNEL, "//guid[@isPermaLink='true']"), ["3"]);
        assert_eq!(values(CHANNEL, "//guid[@isPermaLink!=\"true\"]"), ["1"]);
        assert_eq!(values(CHANNEL, "//item[title='B']/guid"), ["2"]);
    }

    #[test]
    fn boolean_predicates() {
        assert_eq!(values(CHANNEL, "//item[not(title='B')]/guid"), ["1", "3"]);
        assert_eq!(values(CHANNEL, "//item[title='A' or title='B']/guid"), ["1", "2"]);
        assert_eq!(values(CHANNEL, "//item[dc:creator and guid/@isPermaLink='true']/guid"), ["3"]);
        assert_eq!(values(CHANNEL, "//item[(title='A' or title='B') and not(dc:creator)]/guid"), ["2"]);
        assert_eq!(values(CHANNEL, "//item[1 or last()]/guid"), ["1", "3"]);
        assert!(values(CHANNEL, "//item[not(guid)]/title").is_empty());
    }

    #[test]
    fn string_functions() {
        assert_eq!(values(CHANNEL, "/rss/channel/item[contains(title, 'bo')]/guid"), ["3"]);
        assert_eq!(values(CHANNEL, "//item[starts-with(dc:creator, 'b')]/title"), ["C bold"]);
        assert_eq!(values(CHANNEL, "//guid[contains(., '2')]"), ["2"]);
        assert_eq!(values(CHANNEL, "//guid/@isPermaLink[starts-with(., 'fa')]"), ["false"]);
    }

    #[test]
    fn predicate_paths_walk_from_the_filtered_node() {
        assert_eq!(values(CHANNEL, "//guid[../title='B']"), ["2"]);
        assert_eq!(values(CHANNEL, "//title[../dc:creator='bob']/b"), ["bold"]);
        assert_eq!(values(CHANNEL, "//item[.//b]/guid"), ["3"]);
        assert_eq!(values(CHANNEL, "//guid/@isPermaLink[../../title='A']"), ["false"]);
    }

    #[test]
    fn attributes_and_text_nodes() {
        assert_eq!(values(CHANNEL, "//guid/@isPermaLink"), ["false", "true"]);
        assert_eq!(values(CHANNEL, "//item/title/text()"), ["A", "B", "C "]);
        assert_eq!(values(CHANNEL, "//item[1]/guid/.."), values(CHANNEL, "//item[1]"));
    }

    #[test]
    fn namespace_prefixes_resolve_against_the_document() {
        assert_eq!(values(CHANNEL, "//item/dc:creator"), ["ann", "bob"]);
        assert_eq!(values(CHANNEL, "//item/dc:*"), ["ann", "bob"]);
        assert!(values(CHANNEL, "//item/media:creator").is_empty());
    }

    #[test]
    fn unprefixed_names_ignore_default_namespace() {
        let atom = r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry><id>x</id></entry></feed>"#;
        assert_eq!(values(atom, "/feed/entry/id"), ["x"]);
    }

    #[test]
    fn explicit_axes() {
        assert_eq!(values(CHANNEL, "/child::rss/descendant::guid"), ["1", "2", "3"]);
        assert_eq!(values(CHANNEL, "//guid/attribute::isPermaLink"), ["false", "true"]);
        assert_eq!(values(CHANNEL, "//b/ancestor::item/guid"), ["3"]);
        assert_eq!(values(CHANNEL, "//b/ancestor-or-self::*[1]"), ["bold"]);
        assert_eq!(values(CHANNEL, "//title/following-sibling::guid"), ["1", "2", "3"]);
        assert_eq!(values(CHANNEL, "//guid/preceding-sibling::title"), ["A", "B", "C bold"]);
        assert_eq!(values(CHANNEL, "//item[2]/following::guid"), ["3"]);
        assert_eq!(values(CHANNEL, "//item[2]/preceding::guid"), ["1"]);
    }

    #[test]
    fn reverse_axes_count_positions_from_the_context() {
        assert_eq!(values(CHANNEL, "//item[3]/preceding-sibling::item[1]/guid"), ["2"]);
        assert_eq!(values(CHANNEL, "//b/ancestor::*[2]/guid"), ["3"]);
        assert_eq!(values(CHANNEL, "//item[3]/guid/preceding::guid[1]"), ["2"]);
    }

    #[test]
    fn syntax_errors_carry_offsets() {
        let err = Query::compile("/rss/channel/item[").unwrap_err();
        assert_eq!(err.offset, 18);

        let err = Query::compile("/rss/@a/b").unwrap_err();
        assert!(err.message.contains("attribute"));

        let err = Query::compile("//item[count(guid)]").unwrap_err();
        assert_eq!(err.offset, 7);

        assert!(Query::compile("/rss/count(x)").is_err());
        assert!(Query::compile("/rss/item[0]").is_err());
        assert!(Query::compile("/rss/item[@a='x]").is_err());
        assert!(Query::compile("/rss/item[a or]").is_err());
        assert!(Query::compile("/rss/item[contains(a)]").is_err());
        assert!(Query::compile("/rss/namespace::x").is_err());
        assert!(Query::compile("/rss/ch annel").is_err());
        assert!(Query::compile("   ").is_err());
    }

    #[test]
    fn root_only_path_is_valid() {
        let q = Query::compile("/").unwrap();
        assert_eq!(q.steps.len(), 0);
        assert_eq!(values("<a>x<b>y</b></a>", "/"), ["xy"]);
    }
}
