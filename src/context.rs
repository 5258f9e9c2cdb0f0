//! Build sessions: implicit parent attachment through scoped blocks.
//!
//! A [`BuildContext`] keeps a stack of open elements. Nodes added through the
//! context land in the innermost open scope, so a tree can be declared with
//! block structure instead of nested argument lists:
//!
//! ```
//! use tagtree::BuildContext;
//! use tagtree::elements::{div, li, ul};
//!
//! let mut cx = BuildContext::new();
//! {
//!     let mut list = cx.enter_scope(ul())?;
//!     list.add(li().with_child("one")?)?;
//!     list.add(li().with_child("two")?)?;
//! }
//! let roots = cx.finish()?;
//! assert_eq!(roots[0].serialize(false), "<ul><li>one</li><li>two</li></ul>");
//! # Ok::<(), tagtree::Error>(())
//! ```
//!
//! Closing a scope moves its element into the enclosing scope, or into the
//! context's root list when no scope is open. The stack belongs to the caller,
//! so independent builds (on different threads or interleaved on one) never
//! share state.

use std::ops::{Deref, DerefMut};

use tracing::{debug, error, trace};

use crate::error::{Error, Result};
use crate::node::{Element, Node};

/// Handle to a scope opened with [`BuildContext::push_scope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId {
    depth: usize,
    serial: u64,
}

impl ScopeId {
    /// Nesting depth of the scope; the outermost scope has depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[derive(Debug)]
struct Frame {
    element: Element,
    serial: u64,
    /// Owned by a live [`Scope`]; only the guard may close it.
    guarded: bool,
}

/// A build session holding the stack of open scopes.
#[derive(Debug, Default)]
pub struct BuildContext {
    stack: Vec<Frame>,
    roots: Vec<Node>,
    next_serial: u64,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a single element by running `f` inside a scope on `root`.
    ///
    /// ```
    /// use tagtree::BuildContext;
    /// use tagtree::elements::{body, h1, html};
    ///
    /// let page = BuildContext::build(html(), |cx| {
    ///     let mut b = cx.enter_scope(body())?;
    ///     b.add(h1().with_child("Welcome")?)
    /// })?;
    /// assert_eq!(page.serialize(false), "<html><body><h1>Welcome</h1></body></html>");
    /// # Ok::<(), tagtree::Error>(())
    /// ```
    pub fn build<F>(root: Element, f: F) -> Result<Element>
    where
        F: FnOnce(&mut BuildContext) -> Result<()>,
    {
        let mut cx = BuildContext::new();
        {
            let mut scope = cx.enter_scope(root)?;
            f(&mut *scope)?;
            scope.close()?;
        }
        let mut roots = cx.finish()?;
        let count = roots.len();
        match roots.pop() {
            Some(Node::Element(el)) if count == 1 => Ok(el),
            _ => Err(Error::ScopeDiscipline {
                expected: "a single root element".to_string(),
                found: format!("{count} root nodes"),
            }),
        }
    }

    /// The innermost open scope, if any.
    pub fn current_scope(&self) -> Option<&Element> {
        self.stack.last().map(|frame| &frame.element)
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Nodes that were added or closed while no scope was open.
    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    /// Add a node to the innermost open scope, or record it as a root.
    ///
    /// Fails with [`Error::InvalidStructure`] if the innermost scope cannot
    /// take children.
    pub fn add(&mut self, node: impl Into<Node>) -> Result<()> {
        let node = node.into();
        match self.stack.last_mut() {
            Some(frame) => frame.element.append(node),
            None => {
                trace!("recording free-standing root");
                self.roots.push(node);
                Ok(())
            }
        }
    }

    /// Open a scope on `element`, returning a guard that closes it when
    /// dropped. The guard dereferences to this context.
    ///
    /// Void elements cannot be entered.
    pub fn enter_scope(&mut self, element: Element) -> Result<Scope<'_>> {
        let id = self.open(element, true)?;
        Ok(Scope {
            cx: self,
            id,
            open: true,
        })
    }

    /// Open a scope without a guard. It must be closed with
    /// [`pop_scope`](Self::pop_scope) in reverse order of opening.
    pub fn push_scope(&mut self, element: Element) -> Result<ScopeId> {
        self.open(element, false)
    }

    /// Close the innermost scope, which must be `id`.
    ///
    /// On a mismatch the stack is left untouched and
    /// [`Error::ScopeDiscipline`] is returned. Scopes opened with
    /// [`enter_scope`](Self::enter_scope) belong to their guard and cannot be
    /// popped here.
    pub fn pop_scope(&mut self, id: ScopeId) -> Result<()> {
        match self.stack.last() {
            Some(top) if top.serial == id.serial && top.guarded => {
                return Err(Error::ScopeDiscipline {
                    expected: "a scope opened with push_scope".to_string(),
                    found: format!("<{}> owned by a scope guard", top.element.tag()),
                });
            }
            Some(top) if top.serial == id.serial => {}
            Some(top) => {
                return Err(Error::ScopeDiscipline {
                    expected: format!("<{}>", top.element.tag()),
                    found: self.describe(id),
                });
            }
            None => {
                return Err(Error::ScopeDiscipline {
                    expected: "an open scope".to_string(),
                    found: self.describe(id),
                });
            }
        }
        self.close_top()
    }

    fn open(&mut self, element: Element, guarded: bool) -> Result<ScopeId> {
        if element.is_void() {
            return Err(Error::void_element(element.tag()));
        }
        let id = ScopeId {
            depth: self.stack.len(),
            serial: self.next_serial,
        };
        self.next_serial += 1;
        debug!(tag = element.tag(), depth = id.depth, "enter scope");
        self.stack.push(Frame {
            element,
            serial: id.serial,
            guarded,
        });
        Ok(id)
    }

    /// Return the root nodes. Fails if any scope is still open.
    pub fn finish(self) -> Result<Vec<Node>> {
        if let Some(top) = self.stack.last() {
            return Err(Error::ScopeDiscipline {
                expected: "all scopes closed".to_string(),
                found: format!(
                    "{} open scope(s), innermost <{}>",
                    self.stack.len(),
                    top.element.tag()
                ),
            });
        }
        Ok(self.roots)
    }

    fn describe(&self, id: ScopeId) -> String {
        match self.stack.get(id.depth) {
            Some(frame) if frame.serial == id.serial => format!("<{}>", frame.element.tag()),
            _ => "a scope that is no longer open".to_string(),
        }
    }

    fn close_top(&mut self) -> Result<()> {
        let Some(frame) = self.stack.pop() else {
            return Ok(());
        };
        debug!(
            tag = frame.element.tag(),
            depth = self.stack.len(),
            "exit scope"
        );
        self.add(frame.element)
    }

    /// Close `id` together with any scopes still open inside it. Used by guards,
    /// which must leave the stack consistent whatever the caller did inside.
    fn close_through(&mut self, id: ScopeId) -> Result<()> {
        let is_open = self
            .stack
            .get(id.depth)
            .is_some_and(|frame| frame.serial == id.serial);
        if !is_open {
            return Err(Error::ScopeDiscipline {
                expected: "an open scope".to_string(),
                found: "a scope that is already closed".to_string(),
            });
        }

        let mut violation = None;
        while self.stack.len() > id.depth + 1 {
            if violation.is_none()
                && let Some(top) = self.stack.last()
            {
                violation = Some(Error::ScopeDiscipline {
                    expected: self.describe(id),
                    found: format!("<{}> still open", top.element.tag()),
                });
            }
            self.close_top()?;
        }
        self.close_top()?;

        match violation {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Guard for an open scope; closes it when dropped.
///
/// Dropping the guard (on normal exit, early return via `?`, or unwinding)
/// pops the scope and attaches its element to the enclosing scope. Use
/// [`close`](Scope::close) to observe errors instead of logging them.
#[derive(Debug)]
pub struct Scope<'a> {
    cx: &'a mut BuildContext,
    id: ScopeId,
    open: bool,
}

impl Scope<'_> {
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Close the scope now.
    ///
    /// Scopes opened with `push_scope` inside this one and never popped are
    /// closed too, and reported as [`Error::ScopeDiscipline`].
    pub fn close(mut self) -> Result<()> {
        self.open = false;
        self.cx.close_through(self.id)
    }
}

impl Deref for Scope<'_> {
    type Target = BuildContext;

    fn deref(&self) -> &BuildContext {
        self.cx
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut BuildContext {
        self.cx
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        if self.open
            && let Err(err) = self.cx.close_through(self.id)
        {
            error!(%err, "scope guard repaired the build stack");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{br, div, p, span};

    #[test]
    fn test_current_scope_tracks_stack() {
        let mut cx = BuildContext::new();
        assert!(cx.current_scope().is_none());
        {
            let mut outer = cx.enter_scope(div().with_attr("id", "outer")).unwrap();
            assert_eq!(outer.current_scope().map(Element::tag), Some("div"));
            {
                let inner = outer.enter_scope(span()).unwrap();
                assert_eq!(inner.current_scope().map(Element::tag), Some("span"));
                assert_eq!(inner.depth(), 2);
            }
            assert_eq!(outer.current_scope().map(Element::tag), Some("div"));
        }
        assert!(cx.current_scope().is_none());
        assert_eq!(cx.roots().len(), 1);
    }

    #[test]
    fn test_add_without_scope_records_root() {
        let mut cx = BuildContext::new();
        cx.add(p().with_child("free").unwrap()).unwrap();
        cx.add("text").unwrap();
        assert_eq!(cx.finish().unwrap().len(), 2);
    }

    #[test]
    fn test_void_scope_rejected() {
        let mut cx = BuildContext::new();
        let err = cx.enter_scope(br()).unwrap_err();
        assert!(matches!(err, Error::InvalidStructure { .. }));
        assert_eq!(cx.depth(), 0);
    }

    #[test]
    fn test_pop_out_of_order() {
        let mut cx = BuildContext::new();
        let outer = cx.push_scope(div()).unwrap();
        let inner = cx.push_scope(span()).unwrap();

        let err = cx.pop_scope(outer).unwrap_err();
        assert!(matches!(err, Error::ScopeDiscipline { .. }));
        assert_eq!(cx.depth(), 2, "failed pop leaves the stack untouched");

        cx.pop_scope(inner).unwrap();
        cx.pop_scope(outer).unwrap();
        let roots = cx.finish().unwrap();
        assert_eq!(roots[0].serialize(false), "<div><span></span></div>");
    }

    #[test]
    fn test_pop_stale_id() {
        let mut cx = BuildContext::new();
        let id = cx.push_scope(div()).unwrap();
        cx.pop_scope(id).unwrap();
        assert!(matches!(
            cx.pop_scope(id),
            Err(Error::ScopeDiscipline { .. })
        ));
    }

    #[test]
    fn test_finish_with_open_scope() {
        let mut cx = BuildContext::new();
        cx.push_scope(div()).unwrap();
        assert!(matches!(cx.finish(), Err(Error::ScopeDiscipline { .. })));
    }

    #[test]
    fn test_guard_close_repairs_unpopped_inner_scope() {
        let mut cx = BuildContext::new();
        let mut outer = cx.enter_scope(div()).unwrap();
        outer.push_scope(span()).unwrap();
        outer.add("inside span").unwrap();

        let err = outer.close().unwrap_err();
        assert!(matches!(err, Error::ScopeDiscipline { .. }));
        assert_eq!(cx.depth(), 0);
        let roots = cx.finish().unwrap();
        assert_eq!(roots[0].serialize(false), "<div><span>inside span</span></div>");
    }

    #[test]
    fn test_guard_drop_repairs_unpopped_inner_scope() {
        let mut cx = BuildContext::new();
        {
            let mut outer = cx.enter_scope(div()).unwrap();
            outer.push_scope(span()).unwrap();
            outer.add("left open").unwrap();
        }
        assert_eq!(cx.depth(), 0);
        let roots = cx.finish().unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].serialize(false), "<div><span>left open</span></div>");
    }

    #[test]
    fn test_pop_scope_refuses_guarded_scope() {
        let mut cx = BuildContext::new();
        {
            let mut guard = cx.enter_scope(div()).unwrap();
            guard.add("x").unwrap();
            let id = guard.id();
            let err = guard.pop_scope(id).unwrap_err();
            assert!(matches!(err, Error::ScopeDiscipline { .. }));
            assert_eq!(guard.depth(), 1);

            let inner = guard.enter_scope(span()).unwrap();
            drop(inner);
        }
        let roots = cx.finish().unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].serialize(false), "<div>x<span></span></div>");
    }

    #[test]
    fn test_guard_released_on_error() {
        fn fill(cx: &mut BuildContext) -> Result<()> {
            let mut inner = cx.enter_scope(div().with_attr("id", "inner"))?;
            inner.add(span().with_child("before-error")?)?;
            inner.add(br().with_child("boom")?)?;
            Ok(())
        }

        let mut cx = BuildContext::new();
        {
            let mut outer = cx.enter_scope(div().with_attr("id", "outer")).unwrap();
            assert!(fill(&mut outer).is_err());
            assert_eq!(outer.depth(), 1);
            outer.add(p().with_child("after-error").unwrap()).unwrap();
        }
        let roots = cx.finish().unwrap();
        assert_eq!(
            roots[0].serialize(false),
            concat!(
                r#"<div id="outer">"#,
                r#"<div id="inner"><span>before-error</span></div>"#,
                "<p>after-error</p>",
                "</div>"
            )
        );
    }

    #[test]
    fn test_build_returns_root() {
        let el = BuildContext::build(div(), |cx| cx.add("hi")).unwrap();
        assert_eq!(el.serialize(false), "<div>hi</div>");
    }

    #[test]
    fn test_build_rejects_void_root() {
        assert!(BuildContext::build(br(), |_| Ok(())).is_err());
    }
}
