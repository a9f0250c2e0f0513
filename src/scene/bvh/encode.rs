use super::Node;

pub const LEAF_FLAG: f32 = 1.0;
pub const BRANCH_FLAG: f32 = 0.0;

impl Node {
    /// Appends the flat encoding of this subtree to `out`.
    ///
    /// Per node: the six box floats (`min.xyz`, `max.xyz`), the kind flag,
    /// then for a leaf the occupied-slot count and the occupied indices in
    /// slot order, and for a branch the count of non-empty children
    /// followed by one forward offset per such child and their blocks in
    /// the same order. An offset is measured from its own slot, so a
    /// consumer jumps with `slot + buffer[slot]` without parsing the
    /// sibling blocks in between. Children with a negative-volume box are
    /// skipped and contribute neither an offset nor a block.
    ///
    /// The layout is the wire contract with the rendering backend; the
    /// buffer uploads verbatim and the GPU walks it from position 0.
    pub fn encode_into(&self, out: &mut Vec<f32>) {
        let bounds = self.bounds();
        out.extend_from_slice(&[
            bounds.min.x,
            bounds.min.y,
            bounds.min.z,
            bounds.max.x,
            bounds.max.y,
            bounds.max.z,
        ]);
        match self {
            Node::Leaf { slots, .. } => {
                out.push(LEAF_FLAG);
                let held: Vec<u32> = slots.iter().flatten().copied().collect();
                out.push(held.len() as f32);
                out.extend(held.iter().map(|&index| index as f32));
            }
            Node::Branch { children, .. } => {
                out.push(BRANCH_FLAG);
                let present: Vec<&Node> = children
                    .iter()
                    .filter(|child| child.bounds().size() >= 0.0)
                    .collect();
                out.push(present.len() as f32);
                let first_slot = out.len();
                out.resize(first_slot + present.len(), 0.0);
                for (at, child) in present.iter().enumerate() {
                    let slot = first_slot + at;
                    out[slot] = (out.len() - slot) as f32;
                    child.encode_into(out);
                }
            }
        }
    }
}
