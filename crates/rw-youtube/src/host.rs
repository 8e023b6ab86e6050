//! Host extension contract.
//!
//! A host (a markdown pipeline, a site builder) owns parsing and rendering.
//! Extensions plug into it by registering leaf directives that turn
//! `::name[content]{attrs}` into [`Node`]s. Nodes render themselves per
//! [`OutputFormat`](crate::OutputFormat), so the host only needs to dispatch
//! on the directive name.

use crate::{DirectiveArgs, Node, YoutubeError};

/// Handler for leaf directives: `::name[content]{attrs}`.
///
/// Handlers implement `Send` only (not `Sync`) since each document gets its
/// own host instance.
///
/// # Example
///
/// ```
/// use rw_youtube::{DirectiveArgs, EmbedNode, LeafDirective, Node, YoutubeError};
///
/// struct ShortsDirective;
///
/// impl LeafDirective for ShortsDirective {
///     fn name(&self) -> &str { "shorts" }
///
///     fn run(&self, args: &DirectiveArgs) -> Result<Node, YoutubeError> {
///         Ok(Node::Youtube(EmbedNode::new(args.content.clone())))
///     }
/// }
///
/// let node = ShortsDirective.run(&DirectiveArgs::parse("abc", "")).unwrap();
/// assert_eq!(node, Node::Youtube(EmbedNode::new("abc")));
/// ```
pub trait LeafDirective: Send {
    /// Directive name matched against `::name[...]`.
    fn name(&self) -> &str;

    /// Build a node from the directive's arguments.
    ///
    /// An error means no node is produced for this occurrence; the host
    /// reports it against the directive's source location.
    fn run(&self, args: &DirectiveArgs) -> Result<Node, YoutubeError>;
}

/// Registry side of a host that accepts directive extensions.
pub trait ExtensionHost {
    /// Register a directive. A later registration with the same name
    /// replaces the earlier one.
    fn add_directive(&mut self, directive: Box<dyn LeafDirective>);

    /// Whether a directive with this name is registered.
    fn has_directive(&self, name: &str) -> bool;
}
