//! Simple stack-based layout system (similar to SwiftUI/Flutter)

/// Represents a rectangular region
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, row: u16, col: u16) -> bool {
        (row as u32) >= self.y as u32
            && (row as u32) < self.y as u32 + self.height as u32
            && (col as u32) >= self.x as u32
            && (col as u32) < self.x as u32 + self.width as u32
    }

    /// Shrink by `n` cells on every side
    pub fn inset(&self, n: u16) -> Rect {
        Rect {
            x: self.x + n,
            y: self.y + n,
            width: self.width.saturating_sub(n * 2),
            height: self.height.saturating_sub(n * 2),
        }
    }

    pub fn bottom(&self) -> u16 {
        self.y + self.height
    }
}

/// Size constraint for layout items
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Size {
    /// Fixed size in characters
    Fixed(u16),
    /// Flexible - takes up remaining space proportionally (weight)
    Flex(u16),
}

impl Default for Size {
    fn default() -> Self {
        Size::Flex(1)
    }
}

/// Size preferences a widget reports to the layout engine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SizeHint {
    pub min_width: u16,
    pub min_height: u16,
    pub flex: u16,
}

/// A layout node
#[derive(Clone, Debug)]
pub enum LayoutNode {
    /// Vertical stack
    VStack {
        children: Vec<LayoutItem>,
        spacing: u16,
        padding: u16,
    },
    /// Horizontal stack
    HStack {
        children: Vec<LayoutItem>,
        spacing: u16,
        padding: u16,
    },
    /// Leaf node (actual content)
    Leaf { id: String },
}

/// A layout item with size constraints
#[derive(Clone, Debug)]
pub struct LayoutItem {
    pub node: LayoutNode,
    pub width: Size,
    pub height: Size,
    pub min_width: u16,
    pub min_height: u16,
}

impl LayoutItem {
    pub fn vstack(children: Vec<LayoutItem>) -> Self {
        Self {
            node: LayoutNode::VStack { children, spacing: 0, padding: 0 },
            width: Size::Flex(1),
            height: Size::Flex(1),
            min_width: 0,
            min_height: 0,
        }
    }

    pub fn hstack(children: Vec<LayoutItem>) -> Self {
        Self {
            node: LayoutNode::HStack { children, spacing: 0, padding: 0 },
            width: Size::Flex(1),
            height: Size::Flex(1),
            min_width: 0,
            min_height: 0,
        }
    }

    pub fn leaf(id: impl Into<String>) -> Self {
        Self {
            node: LayoutNode::Leaf { id: id.into() },
            width: Size::Flex(1),
            height: Size::Fixed(1),
            min_width: 0,
            min_height: 0,
        }
    }

    pub fn width(mut self, w: Size) -> Self {
        self.width = w;
        self
    }

    pub fn height(mut self, h: Size) -> Self {
        self.height = h;
        self
    }

    pub fn fixed_width(mut self, w: u16) -> Self {
        self.width = Size::Fixed(w);
        self
    }

    pub fn fixed_height(mut self, h: u16) -> Self {
        self.height = Size::Fixed(h);
        self
    }

    pub fn spacing(mut self, s: u16) -> Self {
        match &mut self.node {
            LayoutNode::VStack { spacing, .. } | LayoutNode::HStack { spacing, .. } => *spacing = s,
            LayoutNode::Leaf { .. } => {}
        }
        self
    }

    pub fn padding(mut self, p: u16) -> Self {
        match &mut self.node {
            LayoutNode::VStack { padding, .. } | LayoutNode::HStack { padding, .. } => *padding = p,
            LayoutNode::Leaf { .. } => {}
        }
        self
    }
}

/// Bounds of the direct children of a stack laid out inside `bounds`
pub fn compute_child_bounds(item: &LayoutItem, bounds: Rect) -> Vec<Rect> {
    match &item.node {
        LayoutNode::VStack { children, spacing, padding } => {
            distribute_vertical(children, bounds.inset(*padding), *spacing)
        }
        LayoutNode::HStack { children, spacing, padding } => {
            distribute_horizontal(children, bounds.inset(*padding), *spacing)
        }
        LayoutNode::Leaf { .. } => Vec::new(),
    }
}

fn distribute_vertical(children: &[LayoutItem], bounds: Rect, spacing: u16) -> Vec<Rect> {
    if children.is_empty() {
        return vec![];
    }

    let total_spacing = spacing * (children.len() as u16).saturating_sub(1);
    let available_height = bounds.height.saturating_sub(total_spacing);

    // First pass: calculate fixed sizes and total flex weight
    let mut fixed_total = 0u16;
    let mut flex_total = 0u16;

    for child in children {
        match child.height {
            Size::Fixed(h) => fixed_total = fixed_total.saturating_add(h.max(child.min_height)),
            Size::Flex(w) => flex_total += w,
        }
    }

    let flex_space = available_height.saturating_sub(fixed_total);

    // Second pass: assign heights
    let mut rects = Vec::with_capacity(children.len());
    let mut current_y = bounds.y;

    for child in children {
        let height = match child.height {
            Size::Fixed(h) => h.max(child.min_height),
            Size::Flex(w) => {
                if flex_total > 0 {
                    (flex_space * w / flex_total).max(child.min_height)
                } else {
                    child.min_height
                }
            }
        };

        // Fixed widths never overflow the stack
        let width = match child.width {
            Size::Fixed(w) => w.max(child.min_width).min(bounds.width),
            Size::Flex(_) => bounds.width,
        };

        rects.push(Rect {
            x: bounds.x,
            y: current_y,
            width,
            height,
        });

        current_y = current_y.saturating_add(height).saturating_add(spacing);
    }

    rects
}

fn distribute_horizontal(children: &[LayoutItem], bounds: Rect, spacing: u16) -> Vec<Rect> {
    if children.is_empty() {
        return vec![];
    }

    let total_spacing = spacing * (children.len() as u16).saturating_sub(1);
    let available_width = bounds.width.saturating_sub(total_spacing);

    let mut fixed_total = 0u16;
    let mut flex_total = 0u16;

    for child in children {
        match child.width {
            Size::Fixed(w) => fixed_total = fixed_total.saturating_add(w.max(child.min_width)),
            Size::Flex(w) => flex_total += w,
        }
    }

    let flex_space = available_width.saturating_sub(fixed_total);

    let mut rects = Vec::with_capacity(children.len());
    let mut current_x = bounds.x;
    let right = bounds.x.saturating_add(bounds.width);

    for child in children {
        let width = match child.width {
            Size::Fixed(w) => w.max(child.min_width),
            Size::Flex(w) => {
                if flex_total > 0 {
                    (flex_space * w / flex_total).max(child.min_width)
                } else {
                    child.min_width
                }
            }
        };
        let width = width.min(right.saturating_sub(current_x));

        let height = match child.height {
            Size::Fixed(h) => h.max(child.min_height),
            Size::Flex(_) => bounds.height,
        };

        rects.push(Rect {
            x: current_x,
            y: bounds.y,
            width,
            height,
        });

        current_x = current_x.saturating_add(width).saturating_add(spacing);
    }

    rects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vstack_stacks_fixed_rows_in_order() {
        let item = LayoutItem::vstack(vec![
            LayoutItem::leaf("a").fixed_height(1),
            LayoutItem::leaf("b").fixed_height(3),
            LayoutItem::leaf("c").fixed_height(2),
        ])
        .spacing(1);

        let rects = compute_child_bounds(&item, Rect::new(1, 1, 20, 40));
        let ys: Vec<u16> = rects.iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![1, 3, 7]);
        assert!(rects.iter().all(|r| r.width == 20));
    }

    #[test]
    fn test_fixed_width_is_clamped_to_stack() {
        let item = LayoutItem::vstack(vec![LayoutItem::leaf("wide").fixed_width(90)]);
        let rects = compute_child_bounds(&item, Rect::new(1, 1, 30, 5));
        assert_eq!(rects[0].width, 30);
    }

    #[test]
    fn test_hstack_centers_fixed_child_between_flex_spacers() {
        let item = LayoutItem::hstack(vec![
            LayoutItem::leaf("left"),
            LayoutItem::leaf("mid").fixed_width(10),
            LayoutItem::leaf("right"),
        ]);
        let rects = compute_child_bounds(&item, Rect::new(1, 1, 30, 1));
        assert_eq!(rects[1].x, 11);
        assert_eq!(rects[1].width, 10);
    }

    #[test]
    fn test_padding_insets_children() {
        let item = LayoutItem::vstack(vec![LayoutItem::leaf("a").fixed_height(1)]).padding(2);
        let rects = compute_child_bounds(&item, Rect::new(1, 1, 20, 10));
        assert_eq!(rects[0], Rect::new(3, 3, 16, 1));
    }
}
