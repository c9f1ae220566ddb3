//! Canned explanations used when no model answer is available
//!
//! Selection is by substring of the error message, checked in table order. Anything unmatched
//! gets the generic explanation, which quotes the message.

use std::borrow::Cow;

const ZERO_DIVISION: &str = r#"## Division by Zero Error

**What happened:**
You tried to divide a number by zero, which is mathematically undefined.

**Why it's a problem:**
In mathematics, division by zero doesn't have a defined result, so Python raises an error when you try to do this.

**How to fix it:**
1. Check if your divisor could be zero
2. Add a condition to handle the zero case separately

**Example solution:**
```python
# Instead of directly dividing
if divisor != 0:
    result = numerator / divisor
else:
    result = "Cannot divide by zero"
```"#;

const NAME_ERROR: &str = r#"## Name Error

**What happened:**
You're trying to use a variable that hasn't been defined yet.

**Why it's a problem:**
Python can only work with variables after you've created them and given them a value.

**How to fix it:**
1. Check for typos in your variable names
2. Make sure you define variables before using them
3. Verify variable scope (where the variable is accessible)

**Example solution:**
```python
# First define the variable
my_variable = 10

# Then use it
print(my_variable)
```"#;

/// Error-kind marker and the explanation shown for it
const TABLE: &[(&str, &str)] = &[
    ("ZeroDivisionError", ZERO_DIVISION),
    ("NameError", NAME_ERROR),
];

/// Explanation for an error message that nothing in the table matches
pub fn generic_explanation(error_message: &str) -> String {
    format!(
        r#"## Error Analysis

**What happened:**
Your code encountered an error: `{error_message}`

**Why it's a problem:**
This error prevents your program from executing correctly.

**How to fix it:**
1. Look at the line number mentioned in the error
2. Check the syntax and logic around that area
3. Verify that all variables are properly defined
4. Ensure correct data types are being used

**Debugging tips:**
- Add print statements to track variable values
- Break complex operations into smaller steps
- Review Python documentation for correct syntax"#
    )
}

/// Markdown explanation for `error_message`
pub fn fallback_explanation(error_message: &str) -> Cow<'static, str> {
    TABLE
        .iter()
        .find(|(marker, _)| error_message.contains(marker))
        .map(|(_, text)| Cow::Borrowed(*text))
        .unwrap_or_else(|| Cow::Owned(generic_explanation(error_message)))
}

/// Error kinds with a dedicated explanation
pub fn known_error_kinds() -> impl Iterator<Item = &'static str> {
    TABLE.iter().map(|(marker, _)| *marker)
}
