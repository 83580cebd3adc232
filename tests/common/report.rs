//! `rlog` and `co` outputs used across the command tests

pub const FILE2_LOG: &str = "\
RCS file: /cvsroot/demo/module1/file2.txt,v
Working file: module1/file2.txt
head: 1.3
branch:
locks: strict
access list:
symbolic names:
\tRELEASE_1_0: 1.2
\tSTABLE: 1.2.0.2
\tVENDOR: 1.1.1
\tSTART: 1.1.1.1
keyword substitution: kv
total revisions: 5;\tselected revisions: 5
description:
----------------------------
revision 1.3
date: 2010/01/24 14:20:12;  author: joe;  state: Exp;  lines: +2 -1
Third change on trunk
----------------------------
revision 1.2
date: 2010/01/23 10:00:00;  author: ann;  state: Exp;  lines: +5 -0
branches:  1.2.2;
Second change
----------------------------
revision 1.2.2.1
date: 2010/01/23 12:00:00;  author: bob;  state: Exp;  lines: +1 -1
Fix on the stable branch
----------------------------
revision 1.1
date: 2010/01/20 09:00:00;  author: ann;  state: Exp;
branches:  1.1.1;
Initial revision
----------------------------
revision 1.1.1.1
date: 2010/01/20 09:00:00;  author: ann;  state: Exp;  lines: +0 -0
Vendor import
=============================================================================
";

pub const DELETED_FILE_LOG: &str = "\
RCS file: /cvsroot/demo/module2/Attic/deleted_file.txt,v
Working file: module2/deleted_file.txt
head: 1.2
branch:
locks: strict
access list:
symbolic names:
keyword substitution: kv
total revisions: 2;\tselected revisions: 2
description:
----------------------------
revision 1.2
date: 2010-01-24 14:58:59 +0000;  author: joe;  state: dead;  lines: +0 -0;  commitid: 100bc5c4f7b1e8a5ac0;
Removed
----------------------------
revision 1.1
date: 2010-01-22 08:30:00 +0000;  author: joe;  state: Exp;  commitid: 100bc5c4f7b1e8a5ab0;
Added a file that will be removed
=============================================================================
";

/// A file whose default branch is a vendor branch that moved past the trunk head
pub const VENDOR_LOG: &str = "\
RCS file: /cvsroot/demo/module1/file3.txt,v
Working file: module1/file3.txt
head: 1.1
branch: 1.1.1
locks: strict
access list:
symbolic names:
\tV2: 1.1.1.2
\tV1: 1.1.1.1
\tACME: 1.1.1
keyword substitution: kv
total revisions: 3;\tselected revisions: 3
description:
----------------------------
revision 1.1
date: 2010/01/10 08:00:00;  author: ann;  state: Exp;
branches:  1.1.1;
Initial revision
----------------------------
revision 1.1.1.2
date: 2010/01/15 08:00:00;  author: ann;  state: Exp;  lines: +4 -2
Second vendor drop
----------------------------
revision 1.1.1.1
date: 2010/01/10 08:00:00;  author: ann;  state: Exp;  lines: +0 -0
First vendor drop
=============================================================================
";

pub const TOOL_ERROR: &str = "rlog: /cvsroot/demo/module1/broken.txt,v: Revision number is absent\n";

pub const CHECKOUT_BANNER: &str = "\
/cvsroot/demo/module1/file2.txt,v  -->  standard output
co: /cvsroot/demo/module1/file2.txt,v: warning: Unknown phrases like `permissions ...;' are present.
revision 1.2
";

pub const CHECKOUT_MISSING_REVISION: &str = "\
/cvsroot/demo/module1/file2.txt,v  -->  standard output
co: /cvsroot/demo/module1/file2.txt,v: revision 1.9 absent
";

pub fn report(logs: &[&str]) -> String {
    logs.concat()
}
