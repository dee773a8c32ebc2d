mod component;
mod highlight;
mod toggler;

pub use component::CodeWindow;
pub use toggler::Face;

/// One of the two fixed code listings the window alternates between.
pub struct Snippet {
	pub code: &'static str,
	pub badge: &'static str,
	pub file_name: &'static str,
}

impl Snippet {
	/// Line count shown in the window's status bar.
	pub fn line_count(&self) -> usize {
		self.code.lines().count()
	}
}

static VULNERABLE: Snippet = Snippet {
	code: r#"// Vulnerable PR - SQL Injection Risk
const getUser = async (userId) => {
  const query = `SELECT * FROM users 
    WHERE id = '${userId}'`;
  return db.execute(query);
};

// XSS Vulnerability
app.get('/search', (req, res) => {
  res.send('<h1>' + req.query.term + '</h1>');
});"#,
	badge: "⚠ Vulnerabilities Detected",
	file_name: "auth-controller.js",
};

static SECURED: Snippet = Snippet {
	code: r#"// IWEBai-Secure Code ✓
const getUser = async (userId) => {
  const query = 'SELECT * FROM users WHERE id = ?';
  return db.execute(query, [userId]);
};

// XSS Protected
app.get('/search', (req, res) => {
  const safeTerm = sanitize(req.query.term);
  res.send(`<h1>${escape(safeTerm)}</h1>`);
});"#,
	badge: "✓ Secured by Fixpoint",
	file_name: "auth-controller.js",
};

/// `Primary` shows the vulnerable listing, `Secondary` the fixed one.
pub fn snippet(face: Face) -> &'static Snippet {
	match face {
		Face::Primary => &VULNERABLE,
		Face::Secondary => &SECURED,
	}
}
