// Question bank dump exported as plain text from the NPPE question document.
//
// Each question is a block separated by a long run of hyphens:
//
//   12. Question stem
//   A. option
//   B. option
//   C. option
//   D. option
//   Correct Answer: B
//   Rationale: ...
//   Difficulty: 2 (MODERATE)
//   NPPE Syllabus Area: II.3
//   Source Reference: ...
//
// The dump is not strictly regular: headers and footers sit between the
// blocks, and labels are sometimes missing. Blocks that cannot be read are
// reported and skipped.

pub mod error;
pub mod extractor;
pub mod normalizer;
pub mod parser;
pub mod renderer;
pub mod report;
pub mod slug;
pub mod splitter;
pub mod tokenizer;
pub mod validator;
