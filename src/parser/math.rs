use smallvec::SmallVec;

/// An inline math span.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct NodeMath {
    /// The literal contents of the math span.  As the contents are not
    /// interpreted as CrossDown at all, they are contained within this
    /// structure, rather than inserted into a child inline of any kind.
    pub literal: String,
}

/// An inline function plot.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct NodeFunctionPlot {
    /// The plotted expression, e.g. `x^2`.
    pub expression: String,

    /// The domain and, when a second pair is given, the range of the plot.
    pub ranges: SmallVec<[PlotRange; 2]>,
}

/// One closed interval of a plot's domain or range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotRange {
    /// The lower bound.
    pub from: f64,

    /// The upper bound.
    pub to: f64,
}

/// Parses a function-plot payload: `¥expr¥` optionally followed by `€a,b€`
/// or `€a,b|c,d€`, nothing else.  Any malformation yields `None` and the
/// caller falls back to a plain code span.
pub(crate) fn scan_function_plot(payload: &str) -> Option<NodeFunctionPlot> {
    let rest = payload.strip_prefix('¥')?;
    let close = rest.find('¥')?;
    let expression = rest[..close].trim_matches([' ', '\t']).to_string();
    if expression.is_empty() {
        return None;
    }

    let tail = &rest[close + '¥'.len_utf8()..];
    let mut ranges = SmallVec::new();
    if !tail.is_empty() {
        let inner = tail.strip_prefix('€')?.strip_suffix('€')?;
        let segments: Vec<&str> = inner.split('|').collect();
        if segments.len() > 2 {
            return None;
        }
        for segment in segments {
            ranges.push(plot_range(segment)?);
        }
    }

    Some(NodeFunctionPlot { expression, ranges })
}

fn plot_range(segment: &str) -> Option<PlotRange> {
    let (from, to) = segment.split_once(',')?;
    Some(PlotRange {
        from: parse_bound(from)?,
        to: parse_bound(to)?,
    })
}

fn parse_bound(raw: &str) -> Option<f64> {
    let raw = raw.trim_matches([' ', '\t']);
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}
