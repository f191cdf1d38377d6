//! Nested objects owned by nested attributes and blocks.

use crate::convert::{CollectionKind, PlanModifiersCustom, ValidatorsCustom};
use crate::external::AssocExtType;
use crate::node::{Facets, GeneratorNode, NestedNode};
use crate::{Error, Result};
use schemagen_spec::{AssociatedExternalType, Attribute, Block, CustomType, PlanModifier, Validator};
use std::collections::BTreeMap;
use std::{mem, slice};

/// The object inside a nested attribute or block.
///
/// Children are keyed by name; attribute and block names never collide.
#[derive(Debug, Clone)]
pub struct NestedObject {
    /// External type the object converts to and from
    pub associated_external_type: Option<AssocExtType>,
    /// Child attributes
    pub attributes: BTreeMap<String, GeneratorNode>,
    /// Child blocks
    pub blocks: BTreeMap<String, GeneratorNode>,
    /// Override for the generated object type
    pub custom_type: Option<CustomType>,
    /// Object plan modifiers
    pub plan_modifiers: PlanModifiersCustom,
    /// Object validators
    pub validators: ValidatorsCustom,
}

impl NestedObject {
    /// Build the children of the object named `parent`
    ///
    /// Nested descendants are built from an explicit stack, so any depth
    /// the input holds is accepted.
    ///
    /// # Errors
    ///
    /// Propagates child construction errors and returns
    /// [`Error::DuplicateName`] when two children share a name
    pub fn new(parent: &str, attributes: &[Attribute], blocks: &[Block]) -> Result<Self> {
        let mut frame = Frame::new(parent, Self::empty(), attributes, blocks);
        while let Some((name, shell)) = frame.next_child()? {
            let node = match shell {
                Shell::Leaf(node) => node,
                Shell::Nested(pending) => pending.build()?,
            };
            frame.insert(name, node);
        }
        Ok(frame.object)
    }

    pub(crate) fn empty() -> Self {
        Self {
            associated_external_type: None,
            attributes: BTreeMap::new(),
            blocks: BTreeMap::new(),
            custom_type: None,
            plan_modifiers: PlanModifiersCustom::new(CollectionKind::Object, &[]),
            validators: ValidatorsCustom::new(CollectionKind::Object, &[]),
        }
    }

    /// Bind an external type
    #[must_use]
    pub fn with_associated_external_type(
        mut self,
        associated_external_type: Option<&AssociatedExternalType>,
    ) -> Self {
        self.associated_external_type = associated_external_type.map(AssocExtType::new);
        self
    }

    /// Override the generated object type
    #[must_use]
    pub fn with_custom_type(mut self, custom_type: Option<&CustomType>) -> Self {
        self.custom_type = custom_type.cloned();
        self
    }

    /// Set the object plan modifiers
    #[must_use]
    pub fn with_plan_modifiers(mut self, plan_modifiers: &[PlanModifier]) -> Self {
        self.plan_modifiers = PlanModifiersCustom::new(CollectionKind::Object, plan_modifiers);
        self
    }

    /// Set the object validators
    #[must_use]
    pub fn with_validators(mut self, validators: &[Validator]) -> Self {
        self.validators = ValidatorsCustom::new(CollectionKind::Object, validators);
        self
    }

    /// Whether a `<Name>Type`/`<Name>Value` pair has to be generated
    #[must_use]
    pub const fn generates_custom_type(&self) -> bool {
        self.custom_type.is_none()
    }

    // Everything but the children.
    pub(crate) fn shallow_eq(&self, other: &Self) -> bool {
        self.associated_external_type == other.associated_external_type
            && self.custom_type == other.custom_type
            && self.plan_modifiers == other.plan_modifiers
            && self.validators == other.validators
            && self.attributes.keys().eq(other.attributes.keys())
            && self.blocks.keys().eq(other.blocks.keys())
    }

    pub(crate) fn children(&self) -> impl Iterator<Item = &GeneratorNode> {
        self.attributes.values().chain(self.blocks.values())
    }
}

impl PartialEq for NestedObject {
    fn eq(&self, other: &Self) -> bool {
        self.shallow_eq(other)
            && self
                .children()
                .zip(other.children())
                .all(|(a, b)| a.equal(b))
    }
}

impl Drop for NestedObject {
    fn drop(&mut self) {
        let mut pending: Vec<GeneratorNode> = mem::take(&mut self.attributes)
            .into_values()
            .chain(mem::take(&mut self.blocks).into_values())
            .collect();

        while let Some(mut node) = pending.pop() {
            if let Some(object) = node.nested_object_mut() {
                pending.extend(mem::take(&mut object.attributes).into_values());
                pending.extend(mem::take(&mut object.blocks).into_values());
            }
        }
    }
}

/// A specification attribute or block before its children are built
pub(crate) enum Shell<'a> {
    /// Node without a nested object, complete as is
    Leaf(GeneratorNode),
    /// Nested node waiting for its children
    Nested(Pending<'a>),
}

/// Nested node under construction
pub(crate) struct Pending<'a> {
    wrap: fn(NestedNode) -> GeneratorNode,
    facets: Facets,
    frame: Frame<'a>,
}

impl<'a> Pending<'a> {
    pub(crate) fn new(
        name: &'a str,
        wrap: fn(NestedNode) -> GeneratorNode,
        facets: Facets,
        object: NestedObject,
        attributes: &'a [Attribute],
        blocks: &'a [Block],
    ) -> Self {
        Self {
            wrap,
            facets,
            frame: Frame::new(name, object, attributes, blocks),
        }
    }

    fn finish(self) -> (&'a str, GeneratorNode) {
        let node = (self.wrap)(NestedNode {
            facets: self.facets,
            nested_object: self.frame.object,
        });
        (self.frame.name, node)
    }

    /// Build the node and its whole subtree, depth first
    pub(crate) fn build(self) -> Result<GeneratorNode> {
        let mut ancestors: Vec<Self> = Vec::new();
        let mut current = self;

        loop {
            match current.frame.next_child()? {
                Some((name, Shell::Leaf(node))) => current.frame.insert(name, node),
                Some((_, Shell::Nested(child))) => {
                    ancestors.push(mem::replace(&mut current, child));
                }
                None => {
                    let (name, node) = current.finish();
                    match ancestors.pop() {
                        Some(parent) => {
                            current = parent;
                            current.frame.insert(name, node);
                        }
                        None => return Ok(node),
                    }
                }
            }
        }
    }
}

/// Object whose children are being built, in declaration order
struct Frame<'a> {
    name: &'a str,
    object: NestedObject,
    attributes: slice::Iter<'a, Attribute>,
    blocks: slice::Iter<'a, Block>,
}

impl<'a> Frame<'a> {
    fn new(
        name: &'a str,
        object: NestedObject,
        attributes: &'a [Attribute],
        blocks: &'a [Block],
    ) -> Self {
        Self {
            name,
            object,
            attributes: attributes.iter(),
            blocks: blocks.iter(),
        }
    }

    // Attributes first, then blocks. A name is checked against the siblings
    // already inserted before its node is started.
    fn next_child(&mut self) -> Result<Option<(&'a str, Shell<'a>)>> {
        if let Some(attribute) = self.attributes.next() {
            if self.object.attributes.contains_key(&attribute.name) {
                return Err(Error::duplicate_name(&attribute.name, self.name));
            }
            return Ok(Some((attribute.name.as_str(), GeneratorNode::attribute_shell(attribute)?)));
        }

        if let Some(block) = self.blocks.next() {
            if self.object.attributes.contains_key(&block.name)
                || self.object.blocks.contains_key(&block.name)
            {
                return Err(Error::duplicate_name(&block.name, self.name));
            }
            return Ok(Some((block.name.as_str(), GeneratorNode::block_shell(block)?)));
        }

        Ok(None)
    }

    fn insert(&mut self, name: &str, node: GeneratorNode) {
        let children = if node.kind().is_block() {
            &mut self.object.blocks
        } else {
            &mut self.object.attributes
        };
        children.insert(name.to_string(), node);
    }
}
