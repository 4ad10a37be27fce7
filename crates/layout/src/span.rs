use crate::LayoutError;
use crate::style::TextStyle;
use crate::widget::{AnnotationBuilder, Widget};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// A node in the inline content tree: either styled text (with optional
/// children) or a single embedded widget.
pub enum InlineSpan {
    Text(TextSpan),
    Widget(WidgetSpan),
}

#[derive(Default)]
pub struct TextSpan {
    pub style: Option<TextStyle>,
    pub text: Option<String>,
    /// Baseline shift in unscaled points, positive upwards.
    pub baseline: f32,
    pub children: Vec<InlineSpan>,
    pub annotation: Option<Arc<dyn AnnotationBuilder>>,
}

pub struct WidgetSpan {
    pub style: Option<TextStyle>,
    pub child: Rc<RefCell<dyn Widget>>,
    pub baseline: f32,
    pub annotation: Option<Arc<dyn AnnotationBuilder>>,
}

/// A leaf delivered to the span visitor.
pub enum SpanLeaf<'a> {
    Text { text: &'a str, baseline: f32 },
    Widget {
        child: &'a Rc<RefCell<dyn Widget>>,
        baseline: f32,
    },
}

impl InlineSpan {
    /// A plain text leaf with inherited styling.
    pub fn text(text: impl Into<String>) -> Self {
        InlineSpan::Text(TextSpan {
            text: Some(text.into()),
            ..TextSpan::default()
        })
    }

    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        InlineSpan::Text(TextSpan {
            text: Some(text.into()),
            style: Some(style),
            ..TextSpan::default()
        })
    }

    pub fn widget(child: Rc<RefCell<dyn Widget>>) -> Self {
        InlineSpan::Widget(WidgetSpan {
            style: None,
            child,
            baseline: 0.0,
            annotation: None,
        })
    }

    /// Depth-first pre-order walk delivering every leaf together with its
    /// merged style and nearest annotation. A `TextSpan` contributes its own
    /// text first, then its children in order. Returns `Ok(false)` as soon
    /// as the visitor does, short-circuiting the rest of the walk.
    pub fn visit<F>(
        &self,
        style: &Arc<TextStyle>,
        annotation: Option<&Arc<dyn AnnotationBuilder>>,
        visitor: &mut F,
    ) -> Result<bool, LayoutError>
    where
        F: FnMut(
            SpanLeaf<'_>,
            &Arc<TextStyle>,
            Option<&Arc<dyn AnnotationBuilder>>,
        ) -> Result<bool, LayoutError>,
    {
        match self {
            InlineSpan::Text(span) => {
                let merged = merge_style(style, span.style.as_ref());
                let annotation = span.annotation.as_ref().or(annotation);
                if let Some(text) = &span.text
                    && !visitor(
                        SpanLeaf::Text {
                            text,
                            baseline: span.baseline,
                        },
                        &merged,
                        annotation,
                    )?
                {
                    return Ok(false);
                }
                for child in &span.children {
                    if !child.visit(&merged, annotation, visitor)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            InlineSpan::Widget(span) => {
                let merged = merge_style(style, span.style.as_ref());
                let annotation = span.annotation.as_ref().or(annotation);
                visitor(
                    SpanLeaf::Widget {
                        child: &span.child,
                        baseline: span.baseline,
                    },
                    &merged,
                    annotation,
                )
            }
        }
    }
}

fn merge_style(parent: &Arc<TextStyle>, own: Option<&TextStyle>) -> Arc<TextStyle> {
    match own {
        Some(style) => Arc::new(parent.merge(style)),
        None => parent.clone(),
    }
}
