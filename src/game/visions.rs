//! The fragmented memory sequence the labyrinth feeds the player, one
//! vision per door traversal, plus the truth revealed when the final boss
//! falls.

pub const VISIONS: &[&str] = &[
    "A dimly lit room flickers into view. You're sitting at a table,\n\tstaring at an old clock. Its hands move too fast.",
    "A voice echoes in the distance, calling your name.\n\tYou move toward it, but it grows faint and far away.",
    "You stand in a long corridor lined with framed photographs.\n\tEvery face in the pictures is blurred.",
    "The corridor darkens. Footsteps behind you, but when you turn,\n\tno one is there. You feel watched.",
    "Through a single window you see a city covered in rain.\n\tA car speeds by; someone sits in the passenger seat.",
    "A street at night. A streetlight flickers overhead.\n\tIn the distance, a figure. They're watching you.",
    "The figure walks away into the fog. You follow,\n\tbut they stay just out of reach.",
    "You turn a corner and face a house. Familiar, but wrong.\n\tThe windows are dark, the door slightly ajar.",
    "Inside, the air is heavy with silence. Faint crying from\n\tupstairs. Your chest tightens. You've been here before.",
    "At the top of the stairs, a closed door. The crying stops.\n\tYour hand trembles on the doorknob.",
    "A small, empty room. On the floor, a discarded stuffed bear.\n\tYou recognize it. It was yours.",
    "The house is yours, but the furniture is misplaced and the\n\twalls are painted a color they never were.",
    "Muffled voices behind a wall. You press your ear close,\n\tbut they fade away.",
    "A bridge at night. The water churns below. A scream,\n\tbut you can't see where it comes from.",
    "Your reflection in the water looks back. It's you,\n\tbut older, weary, afraid.",
    "A car speeds past. In the rear window, the shadowy figure\n\tagain, watching.",
    "You run down the street. You know this street, this moment.\n\tIt's coming back to you.",
    "A hospital entrance. The doors slide open and a rush of wind\n\tpulls you inside. The place is empty, but you are not alone.",
    "A voice calls your name again, clearer now. Someone you knew\n\twell. Someone you lost.",
    "The final vision hits like a memory long buried. A hospital\n\troom, a bed, a heart monitor beeping faintly.\n\tYou remember now. You were there when they died.",
];

pub const VISIONS_EXHAUSTED: &str = "You have recalled all you can from your past.";

pub const TRUTH_REVEALED: &str = "As the dust settles and the final battle ends, the truth is revealed...\n\n\
Everything you experienced here was leading to this moment. The visions,\n\
the memories, the challenges: all reflections of your past. The labyrinth\n\
is a construct of your own mind, a way to come to terms with the truths\n\
you buried deep within yourself. With the final boss defeated you are\n\
free, and the memories of your past can finally rest.";

/// Cursor over the vision sequence. Advances once per door traversal and
/// sticks at the closing line once exhausted.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisionReel {
    index: usize,
}

impl VisionReel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The next vision in sequence, or the closing line forever after.
    pub fn next_vision(&mut self) -> &'static str {
        match VISIONS.get(self.index) {
            Some(vision) => {
                self.index += 1;
                vision
            }
            None => VISIONS_EXHAUSTED,
        }
    }
}
